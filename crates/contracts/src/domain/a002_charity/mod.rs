pub mod aggregate;
pub mod schema;

pub const ENDPOINT: &str = "/api/charities";
