use forms::FileRef;
use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};

/// First file selected in the `<input type="file">` that fired `ev`
pub fn picked_file(ev: &Event) -> Option<File> {
    ev.target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

/// Reads a picked file into memory
pub async fn read_file(file: File) -> Result<FileRef, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("failed to read {}: {:?}", file.name(), e))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    let content_type = Some(file.type_()).filter(|t| !t.is_empty());
    Ok(FileRef {
        name: file.name(),
        content_type,
        bytes,
    })
}
