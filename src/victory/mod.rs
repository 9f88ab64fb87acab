//! Victory evaluation.
//!
//! - `result`: the `VictoryResult` score record and its winner queries
//! - `conditions`: the individual victory conditions
//! - `evaluator`: combines the configured conditions per evaluation

pub mod result;
pub mod conditions;
pub mod evaluator;

pub use result::{VictoryReport, VictoryResult, WIN_TOLERANCE};
pub use conditions::{ConditionKind, VictoryCondition};
pub use evaluator::VictoryEvaluator;
