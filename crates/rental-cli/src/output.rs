//! Output formatting module

use rental_app::HistoryEntry;
use rental_domain::{Customer, RentalRecord, Vehicle, VehicleStatus};
use rental_types::{OutputFormat, Result};

pub fn output_vehicles(
    output_format: OutputFormat,
    vehicles: &[&Vehicle],
    status: Option<VehicleStatus>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(vehicles)?);
        return Ok(());
    }

    match status {
        Some(s) => println!("{} Vehicles", s),
        None => println!("All Vehicles"),
    }
    println!("============");

    if vehicles.is_empty() {
        match status {
            Some(s) => println!("No vehicles with status: {}", s),
            None => println!("No vehicles found."),
        }
        return Ok(());
    }

    println!(
        "{:<14} {:<12} {:<12} {:<12} {:>6} {:<10}",
        "Type", "Plate", "Make", "Model", "Year", "Status"
    );
    println!("{}", "-".repeat(71));
    for v in vehicles {
        println!(
            "{:<14} {:<12} {:<12} {:<12} {:>6} {:<10}",
            v.kind.label(),
            truncate(&v.license_plate, 12),
            truncate(&v.make, 12),
            truncate(&v.model, 12),
            v.year,
            v.status
        );
    }

    Ok(())
}

pub fn output_customers(output_format: OutputFormat, customers: &[Customer]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(customers)?);
        return Ok(());
    }

    if customers.is_empty() {
        println!("No customers found.");
        return Ok(());
    }

    for c in customers {
        println!("  {}", c);
    }

    Ok(())
}

pub fn output_history(output_format: OutputFormat, entries: &[HistoryEntry<'_>]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    println!("Rental History");
    println!("==============");

    if entries.is_empty() {
        println!("No rental history found.");
        return Ok(());
    }

    println!(
        "{:<8} {:<12} {:<20} {:<12} {:>12}",
        "Type", "Plate", "Customer", "Date", "Amount"
    );
    println!("{}", "-".repeat(68));
    for entry in entries {
        println!(
            "{:<8} {:<12} {:<20} {:<12} {:>12}",
            entry.record.kind,
            truncate(&entry.vehicle.license_plate, 12),
            truncate(&entry.customer.name, 20),
            entry.record.date.to_string(),
            format!("${:.2}", entry.record.amount)
        );
    }

    Ok(())
}

pub fn output_record(output_format: OutputFormat, record: &RentalRecord, customer_name: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("{} recorded:", record.kind);
    println!("  Vehicle:  {}", record.license_plate);
    println!("  Customer: {} ({})", customer_name, record.customer_id);
    println!("  Date:     {}", record.date);
    println!("  Amount:   ${:.2}", record.amount);

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}
