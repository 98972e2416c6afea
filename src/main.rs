fn main() -> anyhow::Result<()> {
    yarn_typings::run()
}
