#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = gestion_docente::run().await {
        eprintln!("gestion-docente fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
