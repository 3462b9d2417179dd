//! Synthetic WhatsApp export generator for stress testing chatstat.
//!
//! Usage: cargo run --features gen-test --bin gen_chat -- [messages] [output] [senders]
//! Example: cargo run --features gen-test --bin gen_chat -- 100000 data/chats.txt 3

use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use chatstat::parsing::TIMESTAMP_FORMAT;
use chrono::{NaiveDate, TimeDelta};

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "🔥FireUser🔥",
    "Name With Spaces",
    "",
];

const EMOJIS: &[&str] = &["😀", "😂", "🤔", "🙄", "🔥", "👍", "❤️", "🏳️‍🌈", "👨‍👩‍👧‍👦"];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("chats.txt");
    let sender_count: usize = args
        .get(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2)
        .clamp(1, SENDERS.len());

    println!("🧪 Chat Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Senders:  {}", sender_count);
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer
    let mut rng = rand::thread_rng();
    let senders = &SENDERS[..sender_count];

    let start = Instant::now();
    let mut bytes_written: usize = 0;
    let mut timestamp = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default();
    let mut sender = senders[0];

    for i in 0..count {
        timestamp += next_gap(&mut rng);
        // Mostly alternate, sometimes keep talking
        if rng.gen_bool(0.6) {
            sender = senders.choose(&mut rng).copied().unwrap_or(sender);
        }

        let mut chunk = format!(
            "[{}] {}: {}\n",
            timestamp.format(TIMESTAMP_FORMAT),
            sender,
            generate_body(&mut rng, i)
        );

        // Continuation lines and blank lines
        if i % 17 == 3 {
            chunk.push_str(&format!("continued line of message #{}\n", i));
        }
        if i % 251 == 100 {
            chunk.push('\n');
        }

        bytes_written += chunk.len();
        writer.write_all(chunk.as_bytes())?;

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let mps = (i + 1) as f64 / elapsed;
            let mb = bytes_written as f64 / 1_000_000.0;
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                mb,
                mps
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} msg/s",
        count as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}

/// Seconds to minutes most of the time, with the occasional overnight pause
/// beyond the default staleness cutoff.
fn next_gap(rng: &mut impl Rng) -> TimeDelta {
    match rng.gen_range(0..100) {
        0..=59 => TimeDelta::seconds(rng.gen_range(1..120)),
        60..=94 => TimeDelta::minutes(rng.gen_range(2..90)),
        _ => TimeDelta::hours(rng.gen_range(7..30)),
    }
}

fn generate_body(rng: &mut impl Rng, index: usize) -> String {
    match index % 12 {
        0..=5 => format!("Normal message #{} with some text", index),
        6 => format!("Message with \"quotes\", commas; and semicolons #{}", index),
        7 => {
            let emojis: String = (0..10)
                .map(|_| *EMOJIS.choose(rng).unwrap_or(&"🙂"))
                .collect();
            format!("Emoji spam: {} #{}", emojis, index)
        }
        8 => format!("Кириллица: Привет мир! #{}", index),
        9 => format!("Mixed: Hello Привет 你好 🌍 #{}", index),
        10 => "   ".to_string(),
        _ => format!("Colons: in: the: body: #{}", index),
    }
}
