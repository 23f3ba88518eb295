//! Command-line argument parsing for the orderwindow tool

/// Parse command line arguments
pub struct Args {
    pub validate: bool,
    pub status: bool,
    pub calendar: Option<String>,
    pub check: Option<(String, String)>,
    pub help: bool,
}

pub fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    parse_arg_list(&argv)
}

pub fn parse_arg_list(args: &[String]) -> Args {
    let mut result = Args {
        validate: false,
        status: false,
        calendar: None,
        check: None,
        help: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--validate" => result.validate = true,
            "--status" => result.status = true,
            "--calendar" => {
                if i + 1 < args.len() && !args[i + 1].starts_with("--") {
                    i += 1;
                    result.calendar = Some(args[i].clone());
                } else {
                    result.calendar = Some(String::new()); // current month
                }
            }
            "--check" => {
                if i + 2 < args.len() {
                    result.check = Some((args[i + 1].clone(), args[i + 2].clone()));
                    i += 2;
                }
            }
            "--help" | "-h" => result.help = true,
            _ => {}
        }
        i += 1;
    }

    result
}

pub fn print_help() {
    println!("Orderwindow - Delivery Scheduling Engine\n");
    println!("USAGE:");
    println!("    orderwindow [OPTIONS]\n");
    println!("OPTIONS:");
    println!("    --validate              Validate scheduling settings and exit");
    println!("    --status                Show whether same-day ordering is open right now");
    println!("    --calendar [YYYY-MM]    Print the selectable-date calendar for a month");
    println!("    --check DATE HH:MM      Validate a candidate delivery slot (DATE = YYYY-MM-DD)");
    println!("    --help, -h              Show this help message\n");
    println!("ENVIRONMENT:");
    println!("    WORKING_HOURS_START / WORKING_HOURS_END   store hours, \"HH:MM\"");
    println!("    MIN_DELIVERY_DELAY_MINUTES                preparation lead time");
    println!("    MAX_DELIVERY_DAYS                         look-ahead window in days");
    println!("    STORE_TZ                                  IANA timezone of the store");
}
