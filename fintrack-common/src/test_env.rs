use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;

#[derive(Deserialize)]
pub struct Conf {
    pub database_uri: String,
    pub max_db_connections: Option<u32>,
}

pub static CONF: Lazy<Conf> = Lazy::new(build_conf);

fn build_conf() -> Conf {
    const CONF_FILE_PATH: &str = "test-conf.toml";

    let mut conf_file = File::open(CONF_FILE_PATH).unwrap_or_else(|_| {
        eprintln!("ERROR: Expected configuration file at '{}'", CONF_FILE_PATH);
        std::process::exit(1);
    });

    let mut contents = String::new();
    conf_file.read_to_string(&mut contents).unwrap_or_else(|_| {
        eprintln!(
            "ERROR: Configuration file at '{}' should be a text file in the TOML format.",
            CONF_FILE_PATH
        );
        std::process::exit(1);
    });

    match toml::from_str::<Conf>(&contents) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("ERROR: Parsing '{}' failed: {}", CONF_FILE_PATH, e);
            std::process::exit(1);
        }
    }
}

pub mod db {
    use once_cell::sync::Lazy;

    use crate::db::{create_db_thread_pool, DbThreadPool};

    pub static DB_THREAD_POOL: Lazy<DbThreadPool> = Lazy::new(|| {
        create_db_thread_pool(
            crate::test_env::CONF.database_uri.as_str(),
            crate::test_env::CONF.max_db_connections,
            None,
        )
    });
}
