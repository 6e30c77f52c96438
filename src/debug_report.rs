use tajweed::{AnnotateResultVerbose, Candidate, ScanDetails};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(res: &AnnotateResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &res.details;
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Annotating: \"{}\"", res.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Detectors ━━━", ansi::GRAY));
    print_detectors(details, &palette);

    println!("\n{}", palette.paint("━━━ Spans ━━━", ansi::GRAY));
    if res.spans.is_empty() {
        println!("{}", palette.dim("  No spans produced"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • The text carries no diacritics");
        println!("  • Detectors were gated out (no trigger bucket present)");
        println!("  • Every span was disabled with --disable");
        println!("\n{}", palette.dim("  Tip: Set RUST_LOG=tajweed=trace to see each accept and retraction"));
    } else {
        print_spans(res, &palette);
    }

    let superseded: Vec<&Candidate> =
        details.candidates.iter().filter(|c| !res.spans.contains(&c.annotation)).collect();
    if !superseded.is_empty() {
        println!("\n{}", palette.paint("━━━ Superseded ━━━", ansi::GRAY));
        for c in superseded {
            println!("  {}", fmt_candidate(c, &palette));
        }
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Trigger: {}  │  Scan: {}  │  Resolve: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.dim(format!("{:?}", details.trigger)),
        palette.paint(format!("{:?}", details.scan), ansi::CYAN),
        palette.dim(format!("{:?}", details.resolve)),
    );
    println!(
        "  Proposals: {}  │  Retracted: {}  │  Dropped: {}",
        palette.paint(details.proposals.to_string(), ansi::BLUE),
        palette.paint(details.retracted.to_string(), ansi::YELLOW),
        palette.paint(details.dropped.to_string(), ansi::YELLOW),
    );
    println!();
}

fn print_detectors(details: &ScanDetails, palette: &ansi::Palette) {
    println!("  {} active", palette.paint(details.active_detectors.len().to_string(), ansi::BLUE));
    for h in &details.hits {
        let hits = if h.hits > 0 {
            palette.paint(format!("✓ {}", h.hits), ansi::GREEN)
        } else {
            palette.dim(format!("✗ {}", h.hits))
        };
        println!("    {} {}", palette.paint(format!("{:<22}", h.name), ansi::BLUE), hits);
    }
}

fn print_spans(res: &AnnotateResultVerbose, palette: &ansi::Palette) {
    for (idx, span) in res.spans.iter().enumerate() {
        let body: String = res.text.chars().skip(span.start).take(span.length).collect();
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(span.kind.name(), ansi::GREEN)),
            palette.dim("│"),
            palette.paint(format!("span {}..{}", span.start, span.end()), ansi::YELLOW),
        );
        println!(
            "      {} {}  {} {}",
            palette.dim("text:"),
            palette.paint(format!("\"{body}\""), ansi::CYAN),
            palette.dim("│ code points:"),
            palette.dim(body.chars().map(|c| format!("U+{:04X}", c as u32)).collect::<Vec<_>>().join(" ")),
        );
    }
}

fn fmt_candidate(c: &Candidate, palette: &ansi::Palette) -> String {
    format!(
        "{} {} {} {}",
        palette.paint(format!("{}..{}", c.annotation.start, c.annotation.end()), ansi::YELLOW),
        palette.paint(c.annotation.kind.name(), ansi::BLUE),
        palette.dim(format!("by {}", c.detector)),
        palette.dim(format!("\"{}\"", c.text)),
    )
}
