fn main() -> anyhow::Result<()> {
    lottonet::log()?;
    lottonet::run()
}
