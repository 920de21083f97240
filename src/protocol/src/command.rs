//! Commands posted from the control side to a running instrument.
//!
//! The JSON shape is the one the browser front end posts, discriminated by a
//! `type` field:
//!
//! ```json
//! {"type": "force-injection", "location": [0.0, 0.33], "force": [1.0, 0.0]}
//! {"type": "adjust-parameter", "name": "tension", "value": 2.0}
//! {"type": "model-type", "value": "plate"}
//! {"type": "close"}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
	ForceInjection { location: [f32; 2], force: [f32; 2] },
	AdjustParameter { name: Parameter, value: f32 },
	ModelType { value: ModelType },
	Close,
}

impl Command {
	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
	Mass,
	Tension,
	Damping,
}

impl fmt::Display for Parameter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Parameter::Mass => "mass",
			Parameter::Tension => "tension",
			Parameter::Damping => "damping",
		};
		f.write_str(name)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelType {
	#[default]
	String,
	Plate,
	Random,
	MultiString,
}

impl ModelType {
	pub fn name(&self) -> &'static str {
		match self {
			ModelType::String => "string",
			ModelType::Plate => "plate",
			ModelType::Random => "random",
			ModelType::MultiString => "multi-string",
		}
	}
}

impl fmt::Display for ModelType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownModelType(pub String);

impl fmt::Display for UnknownModelType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown model type {:?}", self.0)
	}
}

impl std::error::Error for UnknownModelType {}

impl FromStr for ModelType {
	type Err = UnknownModelType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"string" => Ok(ModelType::String),
			"plate" => Ok(ModelType::Plate),
			"random" => Ok(ModelType::Random),
			"multi-string" => Ok(ModelType::MultiString),
			other => Err(UnknownModelType(other.to_string())),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_parse_commands() {
		let cmd = Command::from_json(
			r#"{"type":"force-injection","location":[0,0.33],"force":[1,0]}"#,
		)
		.unwrap();
		assert_eq!(
			cmd,
			Command::ForceInjection {
				location: [0.0, 0.33],
				force: [1.0, 0.0],
			}
		);
		let cmd = Command::from_json(
			r#"{"value":2.0,"name":"tension","type":"adjust-parameter"}"#,
		)
		.unwrap();
		assert_eq!(
			cmd,
			Command::AdjustParameter {
				name: Parameter::Tension,
				value: 2.0,
			}
		);
		let cmd =
			Command::from_json(r#"{"type":"model-type","value":"multi-string"}"#)
				.unwrap();
		assert_eq!(
			cmd,
			Command::ModelType {
				value: ModelType::MultiString
			}
		);
		assert_eq!(Command::from_json(r#"{"type":"close"}"#).unwrap(), Command::Close);
	}

	#[test]
	fn test_reject_unknown_names() {
		assert!(Command::from_json(r#"{"type":"model-type","value":"drum"}"#).is_err());
		assert!(Command::from_json(
			r#"{"type":"adjust-parameter","name":"stiffness","value":1.0}"#
		)
		.is_err());
		assert!(Command::from_json(r#"{"type":"explode"}"#).is_err());
		assert!(Command::from_json(r#"{"type":"force-injection","location":[0]}"#).is_err());
	}

	#[test]
	fn test_model_type_names() {
		for ty in [
			ModelType::String,
			ModelType::Plate,
			ModelType::Random,
			ModelType::MultiString,
		] {
			assert_eq!(ty.name().parse::<ModelType>().unwrap(), ty);
			let json = Command::ModelType { value: ty }.to_json().unwrap();
			assert!(json.contains(&format!("\"{}\"", ty)));
		}
		assert_eq!(
			"violin".parse::<ModelType>(),
			Err(UnknownModelType("violin".to_string()))
		);
	}
}
