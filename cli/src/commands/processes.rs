//! Processes command - running process table.

use anyhow::Result;
use ifbind_core::IfBindEngine;

pub fn run(engine: &IfBindEngine, name_filter: Option<&str>, json: bool) -> Result<()> {
    let mut processes = engine.list_processes()?;

    if let Some(name) = name_filter {
        processes.retain(|p| p.matches_name(name));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&processes)?);
        return Ok(());
    }

    if processes.is_empty() {
        println!("No matching processes found.");
        return Ok(());
    }

    println!("{:<8} {:<28} PATH", "PID", "NAME");
    println!("{}", "-".repeat(80));

    for process in &processes {
        let path = process
            .executable_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<28} {}",
            process.pid,
            truncate(&process.name, 28),
            truncate(&path, 60)
        );
    }

    println!("\nTotal: {} processes", processes.len());
    Ok(())
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }
}
