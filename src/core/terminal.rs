use console::{style, Emoji};

pub static SUCCESS_ICON: Emoji<'_, '_> = Emoji("✅ ", "");
pub static WARN_ICON: Emoji<'_, '_> = Emoji("⚠️  ", "");
pub static ERROR_ICON: Emoji<'_, '_> = Emoji("❌ ", "");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");

pub fn print_success(msg: &str) {
    println!("{} {}", SUCCESS_ICON, style(msg).green());
}

pub fn print_warn(msg: &str) {
    println!("{} {}", WARN_ICON, style(msg).yellow());
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", ERROR_ICON, style(msg).red().bold());
}

pub fn print_banner() {
    let lines: &[&str] = &[
        " _",
        "| |__   __ _ _ __   __ _  __ _ _ __",
        "| '_ \\ / _` | '_ \\ / _` |/ _` | '__|",
        "| | | | (_| | | | | (_| | (_| | |",
        "|_| |_|\\__,_|_| |_|\\__, |\\__,_|_|",
        "                   |___/",
    ];
    println!();
    for line in lines {
        println!("{}", style(line).cyan());
    }
    println!(
        "{}\n",
        style("The corporate launcher registry.").cyan().dim()
    );
}

/// A titled block of `command  description` lines for the help screen.
pub struct GuideSection {
    title: &'static str,
    commands: Vec<(&'static str, &'static str)>,
}

impl GuideSection {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            commands: Vec::new(),
        }
    }

    pub fn command(mut self, name: &'static str, description: &'static str) -> Self {
        self.commands.push((name, description));
        self
    }

    pub fn print(self) {
        println!(" {}", style(self.title).bold().underlined());
        for (name, description) in self.commands {
            println!("   {:<22} {}", style(name).green(), description);
        }
        println!();
    }
}
