use box_ngin::{
    demos::stack::{self, BoxStackFlow},
    flow,
};

fn main() -> anyhow::Result<()> {
    let config = stack::config();
    flow::run(BoxStackFlow::new(config.clone()), config)
}
