use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = kiosk_api::Args::parse();
	kiosk_api::run(args).await
}
