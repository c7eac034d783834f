use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = kiosk_worker::Args::parse();
	kiosk_worker::run(args).await
}
