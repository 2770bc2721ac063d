//! Демонстрационная запись: число, строка, вектор чисел и вектор строк.
//!
//! Используется бинарником (`zarchive demo`), интеграционными тестами и
//! fuzz-целью как эталонный составной тип.

use std::fmt;

use zarchive_error::ArchiveResult;

use crate::{Archive, Serializable};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DemoRecord {
    pub integer: i32,
    pub text: String,
    pub numbers: Vec<i32>,
    pub words: Vec<String>,
}

impl DemoRecord {
    /// Запись с фиксированным содержимым для демо и тестов.
    pub fn sample() -> Self {
        Self {
            integer: 2,
            text: "Hello".to_string(),
            numbers: vec![1, 2, 3],
            words: vec!["a".to_string(), format!("{}!", "Hello".repeat(12))],
        }
    }
}

impl Serializable for DemoRecord {
    fn serialize<A: Archive>(
        &mut self,
        ar: &mut A,
    ) -> ArchiveResult<()> {
        ar.transcode(&mut self.integer)?;
        ar.transcode(&mut self.text)?;
        ar.transcode(&mut self.numbers)?;
        ar.transcode(&mut self.words)
    }
}

/// `Data=[2 'Hello' {1, 2, 3, }, {'a', '...', }]`
impl fmt::Display for DemoRecord {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Data=[{} '{}' {{", self.integer, self.text)?;
        for n in &self.numbers {
            write!(f, "{n}, ")?;
        }
        write!(f, "}}, {{")?;
        for w in &self.words {
            write!(f, "'{w}', ")?;
        }
        write!(f, "}}]")
    }
}
