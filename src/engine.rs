//! Plan compilation across configured fields

pub mod compiler;

pub use compiler::{CompileResult, FieldError, FieldPlan, PlanCompiler, compile_rules};
