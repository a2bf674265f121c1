use diagnorm::parser::registry;

pub fn execute() -> anyhow::Result<()> {
    for descriptor in registry::all() {
        println!(
            "{:<10} {:<5} {}",
            descriptor.id, descriptor.family, descriptor.name
        );
    }
    Ok(())
}
