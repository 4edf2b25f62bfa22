use clap::Parser;

use crate::models::employer::Employer;

#[derive(Parser, Debug, Clone)]
#[command(name = "hh-collector", about = "Collect hh.ru vacancies into Postgres")]
pub struct Config {
    /// Connection URL for the Postgres server (maintenance database).
    /// The target database is dropped and recreated under this server.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Name of the database to (re)create for this run
    #[arg(long, env = "DATABASE_NAME", default_value = "vacancies_db")]
    pub database_name: String,

    /// Name of the vacancy table
    #[arg(long, env = "TABLE_NAME", default_value = "vacancies")]
    pub table_name: String,

    /// Per-employer cap on fetched vacancies
    #[arg(long, env = "MAX_VACANCIES", default_value = "250")]
    pub max_vacancies: usize,

    /// Base URL of the hh.ru API
    #[arg(long, env = "HH_API_BASE_URL", default_value = "https://api.hh.ru")]
    pub api_base_url: String,

    /// Skip the interactive roster edit and accept the default roster
    #[arg(long, env = "SKIP_CONFIRM", default_value = "false")]
    pub skip_confirm: bool,
}

impl Config {
    /// Connection URL pointing at the freshly created target database.
    pub fn target_database_url(&self) -> String {
        // DATABASE_URL is expected to carry the maintenance database as its
        // path segment; swap it for the target name.
        match self.database_url.rfind('/') {
            Some(idx) if idx > "postgres://".len() => {
                format!("{}/{}", &self.database_url[..idx], self.database_name)
            }
            _ => format!("{}/{}", self.database_url, self.database_name),
        }
    }
}

/// The ten employers the collector fetches by default.
pub fn default_roster() -> Vec<Employer> {
    [
        ("3529", "СБЕР"),
        ("1740", "Яндекс"),
        ("80", "Альфа-Банк"),
        ("15478", "VK"),
        ("78638", "Тинькофф"),
        ("39305", "Газпром нефть"),
        ("4181", "Банк ВТБ (ПАО)"),
        ("3809", "СИБУР, Группа компаний"),
        ("4219", "Tele2"),
        ("3776", "МТС"),
    ]
    .into_iter()
    .map(|(id, name)| Employer {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn target_url_replaces_maintenance_database() {
        let config = Config::parse_from([
            "hh-collector",
            "--database-url",
            "postgres://user:pw@localhost:5432/postgres",
        ]);
        assert_eq!(
            config.target_database_url(),
            "postgres://user:pw@localhost:5432/vacancies_db"
        );
    }

    #[test]
    fn target_url_appends_when_no_path_segment() {
        let config = Config::parse_from([
            "hh-collector",
            "--database-url",
            "postgres://localhost:5432",
            "--database-name",
            "jobs",
        ]);
        assert_eq!(config.target_database_url(), "postgres://localhost:5432/jobs");
    }

    #[test]
    fn default_roster_has_ten_employers() {
        let roster = default_roster();
        assert_eq!(roster.len(), 10);
        assert!(roster.iter().any(|e| e.id == "1740" && e.name == "Яндекс"));
    }
}
