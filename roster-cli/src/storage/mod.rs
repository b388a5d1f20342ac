//! 文件快照序列化器
//!
//! CSV、JSON 与双格式三种实现，均以原子替换的方式写盘；
//! 文件不存在时加载为空集合。
//!
mod atomic;
mod csv;
mod dual;
mod json;

pub use atomic::{read_optional, write_atomically};
pub use csv::{CsvSnapshotSerializer, escape_field, parse_records};
pub use dual::DualFormatSerializer;
pub use json::JsonSnapshotSerializer;
