//! Constant and name pools.
//!
//! Both deduplicate by value and assign indices in first-seen order; the two
//! index spaces are independent.

use indexmap::IndexSet;
use pyfuck_bytecode::Constant;

use crate::{Error, Result};

/// Deduplicated `co_consts` under construction.
#[derive(Debug, Default)]
pub struct ConstantPool {
    values: IndexSet<Constant>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `value`, adding it on first sight.
    pub fn intern(&mut self, value: Constant) -> Result<u32> {
        if !value.is_simple() {
            return Err(Error::UnsupportedConstant(value.kind()));
        }
        let (index, _) = self.values.insert_full(value);
        Ok(index as u32)
    }

    pub fn get(&self, index: u32) -> Option<&Constant> {
        self.values.get_index(index as usize)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Constant> {
        self.values.iter()
    }
}

/// Deduplicated `co_names` under construction.
#[derive(Debug, Default)]
pub struct NamePool {
    names: IndexSet<String>,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, adding it on first sight.
    pub fn intern(&mut self, name: &str) -> u32 {
        if let Some(index) = self.names.get_index_of(name) {
            return index as u32;
        }
        let (index, _) = self.names.insert_full(name.to_owned());
        index as u32
    }

    pub fn get(&self, index: u32) -> Option<&str> {
        self.names.get_index(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, String> {
        self.names.iter()
    }
}
