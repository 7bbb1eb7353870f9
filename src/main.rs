use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = sapn::cli::Opt::parse();
    sapn::cli::main(opt)
}
