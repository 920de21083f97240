use std::time::Instant;

use protocol::command::ModelType;
use protocol::Message;
use springmesh::config::DriverConfig;
use springmesh::driver::instrument;

const BLOCK: usize = 128;

fn main() {
	tracing_subscriber::fmt::init();
	let blocks: usize = std::env::args()
		.nth(1)
		.and_then(|arg| arg.parse().ok())
		.unwrap_or(1000);
	for model in [
		ModelType::String,
		ModelType::Plate,
		ModelType::Random,
		ModelType::MultiString,
	] {
		let config = DriverConfig::default()
			.with_model(model)
			.with_snapshot_interval(u64::MAX);
		let sample_rate = config.sample_rate;
		let (controller, mut driver, _rx) = instrument(config);
		let mut out = [0f32; BLOCK];
		let start = Instant::now();
		for idx in 0..blocks {
			if idx % 100 == 0 {
				let _ = controller.send_json(
					r#"{"type":"force-injection","location":[0.5,0.5],"force":[0.3,0.2]}"#,
				);
			}
			driver.process(&mut out);
		}
		let time = (blocks * BLOCK) as f32 / sample_rate;
		let duration = start.elapsed().as_secs_f32();
		tracing::info!(
			model = %model,
			load_percent = duration / time * 100.0,
			"bench finished"
		);
		let mesh = match driver.mesh() {
			Some(mesh) => mesh,
			None => continue,
		};
		let msg = Message::MeshUpdate(mesh.pr_model(), Default::default());
		match msg.to_bytes() {
			Ok(bytes) => tracing::info!(model = %model, bytes = bytes.len(), "snapshot size"),
			Err(e) => tracing::error!(error = %e, "snapshot encoding failed"),
		}
	}
}
