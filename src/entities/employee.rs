// 👤 Employee Entity - the canonical base record
//
// Employee(Id=234, Name="Johnson") equals another Employee with the same
// id and name, but NEVER a Manager, even one with the same id and name.
//
// Manager embeds an Employee and contributes only its department.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

use super::{
    extended_fields, fmt_extended, require_non_negative, require_text, required, Entity, Extends,
    Field, FieldValue,
};
use crate::error::{RecordError, Result};

// ============================================================================
// EMPLOYEE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EmployeeRecord")]
pub struct Employee {
    pub id: i64,
    pub name: String,
}

impl Employee {
    pub const KIND: &'static str = "Employee";

    pub fn new(id: i64, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::check(Self::KIND, id, &name)?;
        Ok(Employee { id, name })
    }

    pub fn builder() -> EmployeeBuilder {
        EmployeeBuilder::default()
    }

    /// "{id} {name}" without the display label
    pub fn identification(&self) -> String {
        format!("{} {}", self.id, self.name)
    }

    fn check(kind: &'static str, id: i64, name: &str) -> Result<()> {
        require_non_negative(kind, "id", id)?;
        require_text(kind, "name", name)
    }
}

impl Entity for Employee {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("id", FieldValue::Integer(self.id)),
            Field::new("name", FieldValue::Text(&self.name)),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Employee: {} {}", self.id, self.name)
    }
}

value_semantics!(Employee);

#[derive(Debug, Clone, Default)]
pub struct EmployeeBuilder {
    id: Option<i64>,
    name: Option<String>,
}

impl EmployeeBuilder {
    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Employee> {
        let id = required(Employee::KIND, "id", self.id)?;
        let name = required(Employee::KIND, "name", self.name)?;
        Employee::new(id, name)
    }
}

// ============================================================================
// MANAGER
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ManagerRecord")]
pub struct Manager {
    #[serde(flatten)]
    pub employee: Employee,
    pub department: String,
}

impl Manager {
    pub const KIND: &'static str = "Manager";

    pub fn new(id: i64, name: impl Into<String>, department: impl Into<String>) -> Result<Self> {
        Self::promote(
            Employee {
                id,
                name: name.into(),
            },
            department,
        )
    }

    /// Build a manager around an existing employee record.
    pub fn promote(employee: Employee, department: impl Into<String>) -> Result<Self> {
        let department = department.into();
        Employee::check(Self::KIND, employee.id, &employee.name)?;
        require_text(Self::KIND, "department", &department)?;
        Ok(Manager {
            employee,
            department,
        })
    }

    pub fn builder() -> ManagerBuilder {
        ManagerBuilder::default()
    }

    pub fn identification(&self) -> String {
        self.employee.identification()
    }
}

impl Extends for Manager {
    type Base = Employee;

    fn base(&self) -> &Employee {
        &self.employee
    }

    fn own_fields(&self) -> Vec<Field<'_>> {
        vec![Field::new("department", FieldValue::Text(&self.department))]
    }

    fn fmt_extension(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Department: {}", self.department)
    }
}

impl Entity for Manager {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn fields(&self) -> Vec<Field<'_>> {
        extended_fields(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_extended(self, f)
    }
}

value_semantics!(Manager);

#[derive(Debug, Clone, Default)]
pub struct ManagerBuilder {
    id: Option<i64>,
    name: Option<String>,
    department: Option<String>,
}

impl ManagerBuilder {
    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn build(self) -> Result<Manager> {
        let id = required(Manager::KIND, "id", self.id)?;
        let name = required(Manager::KIND, "name", self.name)?;
        let department = required(Manager::KIND, "department", self.department)?;
        Manager::new(id, name, department)
    }
}

// ============================================================================
// DESERIALIZATION
// ============================================================================

#[derive(Deserialize)]
struct EmployeeRecord {
    id: i64,
    name: String,
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = RecordError;

    fn try_from(record: EmployeeRecord) -> Result<Self> {
        Employee::new(record.id, record.name)
    }
}

#[derive(Deserialize)]
struct ManagerRecord {
    id: i64,
    name: String,
    department: String,
}

impl TryFrom<ManagerRecord> for Manager {
    type Error = RecordError;

    fn try_from(record: ManagerRecord) -> Result<Self> {
        Manager::new(record.id, record.name, record.department)
    }
}

// ============================================================================
// TESTS
// ============================================================================
