fn main() -> anyhow::Result<()> {
    reviewgraph_cli::run()
}
