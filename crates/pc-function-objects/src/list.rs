//! Host-side collection of function objects.

use std::collections::BTreeMap;
use std::path::PathBuf;

use pc_mesh::{MeshAccess, MeshMap};
use tracing::{debug, info};

use crate::dictionary::Dictionary;
use crate::error::{FunctionObjectError, FunctionObjectResult};
use crate::function_object::FunctionObject;
use crate::pipe_calc::{self, PipeCalc};
use crate::registry::ObjectRegistry;

/// Builds a function object from its name, the host state and its dictionary.
pub type Constructor = fn(
    &str,
    ObjectRegistry<'_>,
    &Dictionary,
    bool,
) -> FunctionObjectResult<Box<dyn FunctionObject>>;

fn new_pipe_calc(
    name: &str,
    obr: ObjectRegistry<'_>,
    dict: &Dictionary,
    load_from_files: bool,
) -> FunctionObjectResult<Box<dyn FunctionObject>> {
    Ok(Box::new(PipeCalc::new(name, obr, dict, load_from_files)?))
}

struct Entry {
    object: Box<dyn FunctionObject>,
    write_interval: usize,
}

/// Ordered function objects plus the `type` keyword table used to build them.
///
/// Hooks are dispatched in insertion order. `write` is forwarded only on
/// steps that are a multiple of each entry's `writeInterval`.
pub struct FunctionObjectList {
    constructors: BTreeMap<String, Constructor>,
    entries: Vec<Entry>,
}

impl Default for FunctionObjectList {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionObjectList {
    /// Empty list with the built-in types registered.
    pub fn new() -> Self {
        let mut list = Self {
            constructors: BTreeMap::new(),
            entries: Vec::new(),
        };
        list.register(pipe_calc::TYPE_NAME, new_pipe_calc);
        list
    }

    /// Make another `type` keyword available to `from_dict` / `add`.
    pub fn register(&mut self, type_name: &str, constructor: Constructor) {
        self.constructors.insert(type_name.to_string(), constructor);
    }

    pub fn registered_types(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Build one instance per sub-dictionary of a `functions` dictionary.
    pub fn from_dict(
        obr: ObjectRegistry<'_>,
        functions: &Dictionary,
        load_from_files: bool,
    ) -> FunctionObjectResult<Self> {
        let mut list = Self::new();
        for dict in functions.sub_dicts() {
            list.add(obr, dict.name(), &dict, load_from_files)?;
        }
        Ok(list)
    }

    /// Construct an instance from its dictionary and append it.
    pub fn add(
        &mut self,
        obr: ObjectRegistry<'_>,
        name: &str,
        dict: &Dictionary,
        load_from_files: bool,
    ) -> FunctionObjectResult<()> {
        let type_name: String = dict.lookup("type")?;
        let write_interval = write_interval(dict)?;
        let constructor = self
            .constructors
            .get(&type_name)
            .ok_or_else(|| FunctionObjectError::UnknownType {
                name: name.to_string(),
                type_name: type_name.clone(),
            })?;
        let object = constructor(name, obr, dict, load_from_files)?;
        info!(name = %name, type_name = %type_name, write_interval, "function object created");
        self.push(object, write_interval);
        Ok(())
    }

    /// Append an already-built instance.
    pub fn push(&mut self, object: Box<dyn FunctionObject>, write_interval: usize) {
        self.entries.push(Entry {
            object,
            write_interval: write_interval.max(1),
        });
    }

    /// Re-read every instance that has a sub-dictionary in `functions`.
    pub fn read(&mut self, obr: ObjectRegistry<'_>, functions: &Dictionary) -> FunctionObjectResult<()> {
        for entry in &mut self.entries {
            if functions.contains(entry.object.name()) {
                let dict = functions.sub_dict(entry.object.name())?;
                entry.write_interval = write_interval(&dict)?;
                entry.object.read(obr, &dict)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.object.name())
    }

    pub fn get(&self, name: &str) -> Option<&dyn FunctionObject> {
        self.entries
            .iter()
            .find(|e| e.object.name() == name)
            .map(|e| e.object.as_ref())
    }

    pub fn execute(&mut self, obr: ObjectRegistry<'_>) {
        for entry in &mut self.entries {
            entry.object.execute(obr);
        }
    }

    pub fn time_set(&mut self, obr: ObjectRegistry<'_>) {
        for entry in &mut self.entries {
            entry.object.time_set(obr);
        }
    }

    pub fn write(&mut self, obr: ObjectRegistry<'_>) {
        let step = obr.time().index();
        for entry in &mut self.entries {
            if step % entry.write_interval == 0 {
                entry.object.write(obr);
            }
        }
    }

    pub fn end(&mut self, obr: ObjectRegistry<'_>) {
        for entry in &mut self.entries {
            entry.object.end(obr);
        }
    }

    pub fn update_mesh(&mut self, map: &MeshMap) {
        debug!(objects = self.entries.len(), "forwarding topology change");
        for entry in &mut self.entries {
            entry.object.update_mesh(map);
        }
    }

    pub fn move_points(&mut self, mesh: &dyn MeshAccess) {
        for entry in &mut self.entries {
            entry.object.move_points(mesh);
        }
    }

    pub fn output_files(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .flat_map(|e| e.object.output_files())
            .collect()
    }
}

fn write_interval(dict: &Dictionary) -> FunctionObjectResult<usize> {
    let interval: usize = dict.lookup_or_default("writeInterval", 1)?;
    if interval == 0 {
        return Err(FunctionObjectError::InvalidEntry {
            key: "writeInterval".to_string(),
            dict: dict.name().to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(interval)
}
