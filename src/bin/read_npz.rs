use density_slice::{inspect, Dataset, Slice};
use std::{env, path::Path};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    for arg in env::args().skip(1) {
        let path = Path::new(&arg);
        println!("{}", path.display());
        let infos = inspect(path)?;
        for info in &infos {
            println!("  {} : {:?} {}", info.name, info.shape, info.dtype);
        }

        // density arrays are the 1D arrays beside `points` and `shape`
        let keys: Vec<&str> = infos
            .iter()
            .filter(|info| info.shape.len() == 1 && info.name != "shape")
            .map(|info| info.name.as_str())
            .collect();
        let dataset = match Dataset::from_npz(path, &keys) {
            Ok(dataset) => dataset,
            Err(e) => {
                println!("  not a density dataset: {}", e);
                continue;
            }
        };
        for key in dataset.density_keys() {
            match Slice::extract(&dataset, key) {
                Ok(slice) => println!("  {} : {} points at z=0", key, slice.len()),
                Err(e) => println!("  {} : {}", key, e),
            }
        }
    }
    Ok(())
}
