use box_ngin::{
    demos::wedges::{self, WedgesFlow},
    flow,
};

fn main() -> anyhow::Result<()> {
    let config = wedges::config();
    flow::run(WedgesFlow::new(config.clone()), config)
}
