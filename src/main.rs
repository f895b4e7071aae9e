use anyhow::Result;

use doc_index::{app, cli};

fn main() -> Result<()> {
    let args = cli::parse();
    app::run(args)
}
