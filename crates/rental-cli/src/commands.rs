//! Command handlers

use crate::cli::{Cli, Commands, StatusFilter, VehicleType};
use crate::output::{output_customers, output_history, output_record, output_vehicles};
use chrono::{Local, NaiveDate};
use rental_app::config::Config;
use rental_app::repository::open_directory;
use rental_app::RentalDirectory;
use rental_domain::{Customer, RentalStorage, Vehicle, VehicleStatus};
use rental_types::{OutputFormat, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::AddVehicle {
            kind,
            plate,
            make,
            model,
            year,
            seats,
            accessible,
            cargo_size,
            has_trailer,
        } => {
            let vehicle = Vehicle::new(
                kind.into_kind(*seats, *accessible, *cargo_size, *has_trailer),
                plate.clone(),
                make.clone(),
                model.clone(),
                *year,
            );
            cmd_add_vehicle(&config, *kind, vehicle)
        }

        Commands::AddCustomer { id, name } => {
            cmd_add_customer(&config, Customer::new(*id, name.clone()))
        }

        Commands::Rent {
            plate,
            customer,
            amount,
            date,
        } => cmd_rent(&config, output_format, plate, *customer, *date, *amount),

        Commands::Return {
            plate,
            customer,
            fees,
            date,
        } => cmd_return(&config, output_format, plate, *customer, *date, *fees),

        Commands::Vehicles { status } => cmd_vehicles(&config, output_format, *status),

        Commands::Customers => cmd_customers(&config, output_format),

        Commands::History => cmd_history(&config, output_format),

        Commands::Config {
            show,
            set_data_dir,
            set_output,
            reset,
        } => cmd_config(*show, set_data_dir.clone(), *set_output, *reset),
    }
}

/// Print persistence failures the directory swallowed
fn report_failures<S: RentalStorage>(directory: &mut RentalDirectory<S>) {
    for failure in directory.take_persistence_failures() {
        eprintln!("Warning: {}", failure);
    }
}

fn cmd_add_vehicle(config: &Config, kind: VehicleType, vehicle: Vehicle) -> Result<()> {
    let mut directory = open_directory(config)?;
    let plate = vehicle.license_plate.clone();

    let result = directory.add_vehicle(vehicle);
    report_failures(&mut directory);
    result?;

    println!("{:?} {} added", kind, plate);
    Ok(())
}

fn cmd_add_customer(config: &Config, customer: Customer) -> Result<()> {
    let mut directory = open_directory(config)?;
    let summary = customer.to_string();

    let result = directory.add_customer(customer);
    report_failures(&mut directory);
    result?;

    println!("Added {}", summary);
    Ok(())
}

fn cmd_rent(
    config: &Config,
    output_format: OutputFormat,
    plate: &str,
    customer_id: i32,
    date: Option<NaiveDate>,
    amount: Decimal,
) -> Result<()> {
    let mut directory = open_directory(config)?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let result = directory
        .rent_vehicle(plate, customer_id, date, amount)
        .cloned();
    report_failures(&mut directory);
    let record = result?;

    let name = customer_name(&directory, customer_id);
    output_record(output_format, &record, &name)
}

fn cmd_return(
    config: &Config,
    output_format: OutputFormat,
    plate: &str,
    customer_id: i32,
    date: Option<NaiveDate>,
    extra_fees: Decimal,
) -> Result<()> {
    let mut directory = open_directory(config)?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let result = directory
        .return_vehicle(plate, customer_id, date, extra_fees)
        .cloned();
    report_failures(&mut directory);
    let record = result?;

    let name = customer_name(&directory, customer_id);
    output_record(output_format, &record, &name)
}

fn customer_name<S: RentalStorage>(directory: &RentalDirectory<S>, id: i32) -> String {
    directory
        .find_customer_by_id(id)
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

fn cmd_vehicles(
    config: &Config,
    output_format: OutputFormat,
    status: Option<StatusFilter>,
) -> Result<()> {
    let mut directory = open_directory(config)?;
    report_failures(&mut directory);

    let status = status.map(VehicleStatus::from);
    output_vehicles(output_format, &directory.vehicles(status), status)
}

fn cmd_customers(config: &Config, output_format: OutputFormat) -> Result<()> {
    let mut directory = open_directory(config)?;
    report_failures(&mut directory);

    output_customers(output_format, directory.customers())
}

fn cmd_history(config: &Config, output_format: OutputFormat) -> Result<()> {
    let mut directory = open_directory(config)?;
    report_failures(&mut directory);

    let report = directory.load_report();
    if report.skipped_lines > 0 || report.dropped_records > 0 {
        tracing::info!(
            skipped = report.skipped_lines,
            dropped = report.dropped_records,
            "some persisted lines were not loaded"
        );
    }

    output_history(output_format, &directory.history_entries())
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
