use cavegen::config::MapSeed;
use cavegen::room::png::save_rooms_png;
use cavegen::{CaveGenerationParams, generate_cave};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Генератор пещерных уровней
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML
    #[arg(short, long)]
    config: PathBuf,

    /// Каталог для сохранения артефактов (по умолчанию: текущий)
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Игнорировать сид из конфигурации и взять свежий случайный
    #[arg(long)]
    random_seed: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    println!("🔍 Загрузка конфигурации...");
    let mut params = CaveGenerationParams::from_toml_file(cli.config.to_str().unwrap())?;
    if cli.random_seed {
        params.seed = MapSeed::Number(rand::random::<u64>());
    }

    println!(
        "Генерация пещеры (размер: {}×{}, сид: {})...",
        params.width,
        params.height,
        params.seed.value()
    );
    let artifacts = generate_cave(&params)?;

    println!(
        "Комнат: {}, вершин пола: {}, контуров: {}",
        artifacts.rooms.len(),
        artifacts.floor.vertices.len(),
        artifacts.outlines.len()
    );

    fs::create_dir_all(&cli.output_dir)?;
    let path = |name: &str| cli.output_dir.join(name);

    println!("Сохранение превью сетки и комнат...");
    artifacts
        .bordered
        .save_as_png(path("cave_grid.png").to_str().unwrap())?;
    save_rooms_png(
        &artifacts.grid,
        &artifacts.rooms,
        &artifacts.passages,
        path("cave_rooms.png").to_str().unwrap(),
    )?;

    println!("Сохранение мешей и контуров...");
    fs::write(path("cave_mesh.json"), serde_json::to_string_pretty(&artifacts.floor)?)?;
    fs::write(path("cave_walls.json"), serde_json::to_string_pretty(&artifacts.walls)?)?;
    fs::write(
        path("cave_outlines.json"),
        serde_json::to_string_pretty(&artifacts.outlines)?,
    )?;

    println!("\nГотово! Артефакты сохранены в {:?}", cli.output_dir);
    Ok(())
}
