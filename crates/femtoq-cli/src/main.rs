use anyhow::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    femtoq_cli::run(std::env::args_os())
}
