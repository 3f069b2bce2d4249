fn main() -> anyhow::Result<()> {
    agentdeck_lib::run()
}
