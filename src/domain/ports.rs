use crate::domain::model::{BatchReport, InputLine};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn report_filename(&self) -> &str;
    fn only_invalid(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<InputLine>>;
    fn transform(&self, lines: Vec<InputLine>) -> Result<BatchReport>;
    fn load(&self, report: BatchReport) -> Result<Vec<String>>;
}
