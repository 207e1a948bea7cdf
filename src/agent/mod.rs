//! Agent system for answering questions with tool calling.
//!
//! Provides a function-calling agent loop and the tools it can use,
//! starting with NASA's Astronomy Picture of the Day.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{ApodTool, Tool, ToolSet, APOD_TOOL_NAME};
