use anyhow::Context;

fn main() -> anyhow::Result<()> {
    wordcloud_client::run().context("wordcloud-client exited with an error")
}
