use serde::{Deserialize, Serialize};

use super::grade::Grade;

/// Student identifier, unique within a table
pub type StudentId = i64;

/// Operator-supplied attributes of a student (everything except the id)
#[derive(Debug, Clone, PartialEq)]
pub struct StudentFields {
    pub name: String,
    pub age: f64,
    pub class: Grade,
    pub phone: String,
    pub address: String,
    pub parent_info: String,
}

impl Default for StudentFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 0.0,
            class: Grade::Nursery,
            phone: String::new(),
            address: String::new(),
            parent_info: String::new(),
        }
    }
}

/// A single stored student record (one row of the table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "ID")]
    pub id: StudentId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Class")]
    pub class: Grade,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Parent Info")]
    pub parent_info: String,
}

impl Student {
    /// Create a new record
    pub fn new(id: StudentId, fields: StudentFields) -> Self {
        Self {
            id,
            name: fields.name,
            age: fields.age,
            class: fields.class,
            phone: fields.phone,
            address: fields.address,
            parent_info: fields.parent_info,
        }
    }

    /// Copy of every field except the id
    pub fn fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone(),
            age: self.age,
            class: self.class,
            phone: self.phone.clone(),
            address: self.address.clone(),
            parent_info: self.parent_info.clone(),
        }
    }

    /// Overwrite every field except the id
    pub fn overwrite(&mut self, fields: StudentFields) {
        self.name = fields.name;
        self.age = fields.age;
        self.class = fields.class;
        self.phone = fields.phone;
        self.address = fields.address;
        self.parent_info = fields.parent_info;
    }
}
