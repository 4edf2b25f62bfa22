// Interactive stdin loop: roster editing before ingestion, query menu after.
// Pure I/O plumbing; all real work happens in api, ingest and queries.

use std::io::{self, Write};

use sqlx::PgPool;

use crate::api::HeadHunter;
use crate::error::AppError;
use crate::models::employer::{self, Employer};
use crate::queries::{Query, QueryOutput};

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_roster(roster: &[Employer]) {
    for employer in roster {
        println!("  {} (id {})", employer.name, employer.id);
    }
}

/// Greet, show the default roster and let the user add/remove employers
/// until they confirm it.
pub async fn edit_roster(api: &HeadHunter, roster: &mut Vec<Employer>) -> Result<(), AppError> {
    println!("Vacancies will be fetched from hh.ru for these employers:");
    print_roster(roster);

    loop {
        let answer = read_line("Edit the list? y/n -> ")?;
        match answer.to_lowercase().as_str() {
            "y" => {
                edit_loop(api, roster).await?;
                return Ok(());
            }
            "n" => return Ok(()),
            _ => println!("Please answer y or n"),
        }
    }
}

async fn edit_loop(api: &HeadHunter, roster: &mut Vec<Employer>) -> Result<(), AppError> {
    loop {
        let choice = read_line(
            "What to do with the list:\n\
               1 - add an employer\n\
               2 - remove an employer\n\
               3 - done\n\
             -> ",
        )?;

        match choice.as_str() {
            "1" => {
                let keyword = read_line("Keyword to search employers by -> ")?;
                let hits = api.search_employers(&keyword).await?;
                if hits.is_empty() {
                    println!("Nothing found for that keyword");
                    continue;
                }
                println!("Found:");
                for hit in &hits {
                    println!("  {} (id {})", hit.name, hit.id);
                }
                let id = read_line("Employer id to add -> ")?;
                if employer::add_by_id(roster, &hits, &id) {
                    println!("Employer {id} added. Current list:");
                    print_roster(roster);
                } else {
                    println!("No search hit with id {id}");
                }
            }
            "2" => {
                let id = read_line("Employer id to remove -> ")?;
                if employer::remove_by_id(roster, &id) {
                    println!("Employer {id} removed. Current list:");
                    print_roster(roster);
                } else {
                    println!("No employer with id {id} in the list");
                }
            }
            "3" => return Ok(()),
            _ => println!("Please enter 1, 2 or 3"),
        }
    }
}

/// The post-ingestion menu: pick a query key, run it, print the rows.
/// Key 6 exits.
pub async fn query_loop(pool: &PgPool, table: &str) -> Result<(), AppError> {
    loop {
        let key = read_line(
            "Database queries:\n\
               1 - employers and their vacancy counts\n\
               2 - all vacancies\n\
               3 - average salary over all vacancies\n\
               4 - vacancies paying above the average\n\
               5 - vacancies whose name contains a keyword\n\
               6 - quit\n\
             -> ",
        )?;

        if key == "6" {
            return Ok(());
        }

        let keyword = if key == "5" {
            Some(read_line("Keyword to search vacancy names for -> ")?)
        } else {
            None
        };

        let query = match Query::from_key(&key, keyword.as_deref()) {
            Ok(q) => q,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match query.run(pool, table).await {
            Ok(output) => print_output(&output),
            Err(e) => tracing::error!("Query failed: {e}"),
        }
    }
}

fn print_output(output: &QueryOutput) {
    match output {
        QueryOutput::EmployerCounts(rows) => {
            for row in rows {
                println!("{}: {} vacancies", row.employer, row.vacancies);
            }
        }
        QueryOutput::Vacancies(rows) => {
            if rows.is_empty() {
                println!("No vacancies matched");
                return;
            }
            for row in rows {
                println!(
                    "{} | {} | {}-{} {} | {} | {}",
                    row.name,
                    row.area,
                    row.min_salary,
                    row.max_salary,
                    row.currency,
                    row.employer,
                    row.url
                );
            }
        }
        QueryOutput::AverageSalary { avg_min, avg_max } => match (avg_min, avg_max) {
            (Some(min), Some(max)) => {
                println!("Average min salary: {min:.2}, average max salary: {max:.2}");
            }
            _ => println!("The table is empty, no averages to report"),
        },
    }
}
