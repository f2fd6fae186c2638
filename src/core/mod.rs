pub mod engine;
pub mod loader;
pub mod pipeline;
pub mod statistics;

pub use crate::domain::model::{
    AggregateStatistics, Analysis, DepartmentAverage, DepartmentAverages, EmployeeRecord,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
