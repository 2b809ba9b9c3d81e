//! Validated field schema
//!
//! Wraps the ordered descriptor list and precomputes the dependency graph:
//! a topological order plus, per field, its transitive descendants in that
//! order. The schema is immutable once built.

use crate::error::SchemaError;
use contracts::shared::forms::{FieldDescriptor, OptionSource};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct FieldSchema {
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
    /// Field indices, ancestors before dependents
    topo: Vec<usize>,
    /// Transitive dependents of each field, in topological order
    descendants: Vec<Vec<usize>>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if index.insert(field.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        let mut dependents: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); fields.len()];
        let mut in_degree = vec![0usize; fields.len()];
        for (i, field) in fields.iter().enumerate() {
            match &field.options {
                OptionSource::Static(_) if field.is_dependent() => {
                    return Err(SchemaError::StaticOptionsWithDependency(field.name.clone()));
                }
                OptionSource::Static(_) | OptionSource::Remote(_) if !field.kind.is_select() => {
                    return Err(SchemaError::OptionsOnNonSelect(field.name.clone()));
                }
                _ => {}
            }

            for dependency in &field.depends_on {
                let Some(&parent) = index.get(dependency) else {
                    return Err(SchemaError::UnknownDependency {
                        field: field.name.clone(),
                        dependency: dependency.clone(),
                    });
                };
                if dependents[parent].insert(i) {
                    in_degree[i] += 1;
                }
            }
        }

        // Kahn's algorithm, lowest declaration index first for a stable order
        let mut ready: BTreeSet<usize> = (0..fields.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut topo = Vec::with_capacity(fields.len());
        while let Some(i) = ready.pop_first() {
            topo.push(i);
            for &child in &dependents[i] {
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    ready.insert(child);
                }
            }
        }
        if topo.len() < fields.len() {
            let stuck = (0..fields.len())
                .find(|&i| in_degree[i] > 0)
                .map(|i| fields[i].name.clone())
                .unwrap_or_default();
            return Err(SchemaError::DependencyCycle(stuck));
        }

        let mut position = vec![0usize; fields.len()];
        for (pos, &i) in topo.iter().enumerate() {
            position[i] = pos;
        }

        let descendants = (0..fields.len())
            .map(|root| {
                let mut seen = BTreeSet::new();
                let mut stack: Vec<usize> = dependents[root].iter().copied().collect();
                while let Some(i) = stack.pop() {
                    if seen.insert(i) {
                        stack.extend(dependents[i].iter().copied());
                    }
                }
                let mut ordered: Vec<usize> = seen.into_iter().collect();
                ordered.sort_by_key(|&i| position[i]);
                ordered
            })
            .collect();

        Ok(Self {
            fields,
            index,
            topo,
            descendants,
        })
    }

    /// Descriptors in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Descriptors ordered so every ancestor precedes its dependents
    pub fn topological(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.topo.iter().map(move |&i| &self.fields[i])
    }

    /// Every field that directly or transitively depends on `name`,
    /// ancestors first
    pub fn descendants(&self, name: &str) -> impl Iterator<Item = &FieldDescriptor> {
        let slice: &[usize] = match self.index.get(name) {
            Some(&i) => &self.descendants[i],
            None => &[],
        };
        slice.iter().map(move |&i| &self.fields[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityKind;
    use contracts::shared::forms::SelectOption;

    fn names<'a>(it: impl Iterator<Item = &'a FieldDescriptor>) -> Vec<&'a str> {
        it.map(|f| f.name.as_str()).collect()
    }

    fn chain() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::select_remote("association_id", "a", "associations")
                .depends_on(&["city_id", "district_id"]),
            FieldDescriptor::select_remote("district_id", "d", "districts").depends_on(&["city_id"]),
            FieldDescriptor::select_remote("city_id", "c", "cities"),
            FieldDescriptor::text("name", "n"),
        ]
    }

    #[test]
    fn test_topological_order_ignores_declaration_order() {
        let schema = FieldSchema::new(chain()).unwrap();
        assert_eq!(
            names(schema.topological()),
            vec!["city_id", "district_id", "association_id", "name"]
        );
    }

    #[test]
    fn test_descendants_are_transitive_and_ordered() {
        let schema = FieldSchema::new(chain()).unwrap();
        assert_eq!(names(schema.descendants("city_id")), vec!["district_id", "association_id"]);
        assert_eq!(names(schema.descendants("district_id")), vec!["association_id"]);
        assert!(names(schema.descendants("association_id")).is_empty());
        assert!(names(schema.descendants("missing")).is_empty());
    }

    #[test]
    fn test_rejects_unknown_dependency() {
        let err = FieldSchema::new(vec![
            FieldDescriptor::select_remote("district_id", "d", "districts").depends_on(&["city_id"]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownDependency {
                field: "district_id".into(),
                dependency: "city_id".into()
            }
        );
    }

    #[test]
    fn test_rejects_cycles_and_duplicates() {
        let err = FieldSchema::new(vec![
            FieldDescriptor::select_remote("a", "a", "s").depends_on(&["b"]),
            FieldDescriptor::select_remote("b", "b", "s").depends_on(&["a"]),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::DependencyCycle(_)));

        let err = FieldSchema::new(vec![
            FieldDescriptor::select_remote("a", "a", "s").depends_on(&["a"]),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::DependencyCycle("a".into()));

        let err = FieldSchema::new(vec![
            FieldDescriptor::text("name", "n"),
            FieldDescriptor::email("name", "n"),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("name".into()));
    }

    #[test]
    fn test_rejects_static_options_with_dependency() {
        let err = FieldSchema::new(vec![
            FieldDescriptor::text("name", "n"),
            FieldDescriptor::select_static("kind", "k", vec![SelectOption::new("1", "One")])
                .depends_on(&["name"]),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::StaticOptionsWithDependency("kind".into()));
    }

    #[test]
    fn test_entity_schemas_are_valid() {
        for kind in EntityKind::all() {
            let schema = FieldSchema::new(kind.form_fields());
            assert!(schema.is_ok(), "{}: {:?}", kind.as_str(), schema.err());
        }
    }
}
