//! Plain-text output for the `users` and `transactions` subcommands.
//!
//! Two modes: TSV (default, header row then one record per line) and JSON
//! lines (one serialized record per line, for piping into jq or a file).
//! Writer-generic so tests can capture into a buffer.

use std::io::{self, Write};

use broker_api::{Transaction, User};

/// Print a user collection.
pub fn print_users<W: Write>(writer: &mut W, users: &[&User], json_mode: bool) -> io::Result<()> {
    if json_mode {
        for user in users {
            let line = serde_json::to_string(user).map_err(io::Error::other)?;
            writeln!(writer, "{line}")?;
        }
        return Ok(());
    }

    writeln!(writer, "id\tstatus\temail\tfull_name\tcpf")?;
    for user in users {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            user.id,
            user.status,
            user.email,
            user.full_name.as_deref().unwrap_or("-"),
            user.cpf.as_deref().unwrap_or("-"),
        )?;
    }
    Ok(())
}

/// Print a transaction collection.
pub fn print_transactions<W: Write>(
    writer: &mut W,
    txs: &[&Transaction],
    json_mode: bool,
) -> io::Result<()> {
    if json_mode {
        for txn in txs {
            let line = serde_json::to_string(txn).map_err(io::Error::other)?;
            writeln!(writer, "{line}")?;
        }
        return Ok(());
    }

    writeln!(
        writer,
        "id\tstatus\ttype\tamount\tuser_id\trequest_date\tapproval_date"
    )?;
    for txn in txs {
        writeln!(
            writer,
            "{}\t{}\t{}\t{:.2}\t{}\t{}\t{}",
            txn.id,
            txn.status,
            txn.kind,
            txn.amount,
            txn.user_id,
            txn.request_date.as_deref().unwrap_or("-"),
            txn.approval_date.as_deref().unwrap_or("-"),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: i64, status: &str) -> User {
        serde_json::from_value(json!({
            "id": id,
            "email": format!("u{id}@example.com"),
            "status": status,
            "full_name": "Ana Souza",
            "cpf": "123.456.789-00"
        }))
        .unwrap()
    }

    fn txn(id: i64) -> Transaction {
        serde_json::from_value(json!({
            "id": id,
            "user_id": 3,
            "type": "withdrawal",
            "amount": 250.0,
            "status": "pending",
            "request_date": "2025-03-01T14:22:05",
            "approval_date": null
        }))
        .unwrap()
    }

    #[test]
    fn test_users_tsv_has_header_and_rows() {
        let users = [user(1, "pending"), user(2, "approved")];
        let refs: Vec<&User> = users.iter().collect();
        let mut buf = Vec::new();
        print_users(&mut buf, &refs, false).unwrap();

        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id\tstatus\temail\tfull_name\tcpf");
        assert_eq!(
            lines[1],
            "1\tpending\tu1@example.com\tAna Souza\t123.456.789-00"
        );
    }

    #[test]
    fn test_users_json_lines_round_trip() {
        let users = [user(1, "pending")];
        let refs: Vec<&User> = users.iter().collect();
        let mut buf = Vec::new();
        print_users(&mut buf, &refs, true).unwrap();

        let out = String::from_utf8(buf).unwrap();
        let parsed: User = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(parsed.id, 1);
        assert_eq!(parsed.email, "u1@example.com");
    }

    #[test]
    fn test_transactions_tsv_formats_amount_and_nulls() {
        let txs = [txn(7)];
        let refs: Vec<&Transaction> = txs.iter().collect();
        let mut buf = Vec::new();
        print_transactions(&mut buf, &refs, false).unwrap();

        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[1],
            "7\tpending\twithdrawal\t250.00\t3\t2025-03-01T14:22:05\t-"
        );
    }

    #[test]
    fn test_empty_collection_prints_header_only() {
        let mut buf = Vec::new();
        print_users::<Vec<u8>>(&mut buf, &[], false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.lines().count(), 1);
    }
}
