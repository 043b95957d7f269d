use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_stats::{
    Category, Expense, FieldCipher, UserId, create_category, create_expense, initialize_db,
};

/// A utility for creating a demo database for the expense statistics server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The ID of the user that owns the demo expenses.
    #[arg(long, short, env = "DEFAULT_USER_ID", default_value = "demo")]
    user_id: String,

    /// The secret used to encrypt vendor names and expense metadata.
    #[arg(long, env = "ENCRYPTION_KEY", hide_env_values = true)]
    encryption_key: String,

    /// The number of days of expenses to create, ending today.
    #[arg(long, default_value_t = 120)]
    days: i64,
}

/// Vendor, amount and the category the vendor is usually filed under.
const PURCHASES: [(&str, f64, usize); 8] = [
    ("Linella", 23.40, 0),
    ("Kaufland", 61.15, 0),
    ("Petrom", 45.00, 1),
    ("Yandex Go", 8.90, 1),
    ("Tucano Coffee", 4.50, 2),
    ("Andy's Pizza", 17.80, 2),
    ("Orange", 12.00, 3),
    ("Premier Energy", 38.25, 3),
];

/// Create and populate a database with demo expenses.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let user_id = UserId::new(args.user_id);
    let cipher = FieldCipher::from_secret(&args.encryption_key);

    println!("Creating categories...");
    let categories = [
        Category::build(user_id.clone(), "Alimente")
            .color("#34d399")
            .icon("shopping-cart"),
        Category::build(user_id.clone(), "Transport")
            .color("#60a5fa")
            .icon("car"),
        Category::build(user_id.clone(), "Cafenea").icon("coffee"),
        Category::build(user_id.clone(), "Facturi"),
    ]
    .into_iter()
    .map(|category| create_category(category, &conn))
    .collect::<Result<Vec<Category>, _>>()?;

    println!("Creating expenses for the last {} days...", args.days);
    let today = OffsetDateTime::now_utc().date();
    let mut expense_count = 0;

    for day in 0..args.days.max(0) {
        let Some(date) = today.checked_sub(Duration::days(day)) else {
            break;
        };

        for slot in 0..(day % 3) {
            let index = ((day * 5 + slot * 3) as usize) % PURCHASES.len();
            let (vendor, amount, category_index) = PURCHASES[index];
            let amount = amount + (day % 7) as f64;

            // Every fifth expense names its category in the metadata instead.
            let (category_id, metadata) = if (day + slot) % 5 == 0 {
                let name = &categories[category_index].name;
                (None, Some(format!(r#"{{"category": "{name}"}}"#)))
            } else {
                (Some(categories[category_index].id), None)
            };

            let metadata = metadata
                .map(|metadata| cipher.encrypt(&metadata))
                .transpose()?;

            create_expense(
                Expense::build(user_id.clone(), amount, date)
                    .category_id(category_id)
                    .vendor(Some(cipher.encrypt(vendor)?))
                    .encrypted_metadata(metadata),
                &conn,
            )?;
            expense_count += 1;
        }
    }

    println!("Created {expense_count} expenses for user \"{user_id}\".");
    println!("Success!");

    Ok(())
}
