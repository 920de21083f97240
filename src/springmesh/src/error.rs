use protocol::command::Parameter;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("malformed command: {0}")]
	Malformed(#[from] serde_json::Error),
	#[error("{name} must be finite, got {value}")]
	InvalidParameter { name: Parameter, value: f32 },
	#[error("force injection must be finite")]
	InvalidForce,
	#[error("command queue is full")]
	QueueFull,
	#[error("driver is gone")]
	Disconnected,
}
