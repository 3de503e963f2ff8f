//! Interactive transliteration demo.
//!
//! Reads lines from stdin, feeds every character through the engine the way
//! a surface adapter would, and prints the transliterated buffer after each
//! line. `:method <id>` switches tables, `:quit` exits.

use clap::Parser;
use libindic::{
    register_builtin, EditEvent, Engine, JsonFileLoader, MethodRegistry, PlainTextSurface,
    TextSurface,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[derive(Parser)]
#[command(about = "Rule-table transliteration demo")]
struct Args {
    /// Input method id (e.g. hi-translit, sanskrit-iast)
    #[arg(short, long, default_value = "hi-translit")]
    method: String,

    /// Directory with additional JSON method definitions
    #[arg(short, long)]
    data_dir: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let registry = Arc::new(MethodRegistry::new());
    register_builtin(&registry)?;
    if let Some(dir) = &args.data_dir {
        let loader = JsonFileLoader::new(dir);
        if let Err(err) = loader.load_into(&args.method, &registry) {
            eprintln!("note: could not load {:?} from {dir}: {err}", args.method);
        }
    }

    let mut engine = Engine::new(PlainTextSurface::new(), registry.clone());
    engine.activate();
    if !engine.set_method(&args.method) {
        eprintln!("unknown input method {:?}", args.method);
        eprintln!("available: {}", registry.ids().join(", "));
        std::process::exit(1);
    }

    println!("Method: {} (:method <id> to switch, :quit to exit)", args.method);
    print!("> ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;

        if let Some(id) = line.strip_prefix(":method ") {
            if engine.set_method(id.trim()) {
                println!("switched to {}", id.trim());
            } else {
                println!("unknown method {:?}; available: {}", id.trim(), registry.ids().join(", "));
            }
            print!("> ");
            io::stdout().flush()?;
            continue;
        }
        if line.trim() == ":quit" {
            break;
        }

        *engine.surface_mut() = PlainTextSurface::new();
        for ch in line.chars() {
            let (start, end) = engine.surface().caret_range();
            let result = engine.handle_key(&EditEvent::char_over_selection(ch, start, end));
            if !result.is_handled() {
                engine.surface_mut().insert_at_caret(ch);
            }
        }
        println!("{}", engine.surface().text());
        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}
