use outfit_core::{ListEntry, Recommendation, SearchSession};

pub fn print_recommendation(rec: &Recommendation) {
    println!();
    println!("{}  {}", rec.city, rec.date);
    println!("체감 {}°  ({})", rec.feels_like, rec.range);
    println!("{}", rec.summary);
    println!("{}", rec.note);

    println!();
    println!("오늘의 추천 코디");
    for item in &rec.outfit {
        println!("  - {item}");
    }

    println!("팁");
    for tip in &rec.tips {
        println!("  - {tip}");
    }

    println!();
    print_status(&rec.status);
}

pub fn print_status(message: &str) {
    println!("[{message}]");
}

pub fn print_entries(session: &SearchSession) {
    let entries = session.entries();
    if entries.is_empty() {
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        match entry {
            ListEntry::Candidate { city, active } => {
                let marker = if *active { '>' } else { ' ' };
                println!("{marker} {}. {city}", i + 1);
            }
            ListEntry::Notice(text) => println!("    ({text})"),
        }
    }
}
