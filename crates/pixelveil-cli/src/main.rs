use clap::{crate_authors, crate_description, crate_version, Arg, ArgAction, ArgMatches, Command};

use std::path::Path;

use pixelveil_core::commands::{capacity_of, hide_file, reveal_file};
use pixelveil_core::{HideOptions, Pipeline, Result};

fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("Pixelveil CLI")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg_required_else_help(true)
        .subcommand(
            Command::new("hide")
                .about("Hides an encrypted message in a PNG image")
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .value_name("password")
                        .required(false)
                        .help("Password used to encrypt and scramble the message, prompted for when absent"),
                )
                .arg(
                    Arg::new("media")
                        .short('i')
                        .long("in")
                        .value_name("image file")
                        .required(true)
                        .help("Carrier PNG image, used readonly"),
                )
                .arg(
                    Arg::new("write_to_file")
                        .short('o')
                        .long("out")
                        .value_name("output image file")
                        .required(true)
                        .help("Final image will be stored as file"),
                )
                .arg(
                    Arg::new("message")
                        .short('m')
                        .long("message")
                        .value_name("text message")
                        .required(true)
                        .help("The text message that will be hidden"),
                )
                .arg(
                    Arg::new("compress")
                        .short('c')
                        .long("compress")
                        .action(ArgAction::SetTrue)
                        .help("Compress the message before encryption"),
                )
                .arg(
                    Arg::new("no_obfuscate")
                        .long("no-obfuscate")
                        .action(ArgAction::SetTrue)
                        .help("Leave unused pixels untouched instead of filling them with random bits"),
                ),
        )
        .subcommand(
            Command::new("reveal")
                .about("Reveals a hidden message from a PNG image")
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .value_name("password")
                        .required(false)
                        .help("Password used to decrypt the message, prompted for when absent"),
                )
                .arg(
                    Arg::new("input_image")
                        .short('i')
                        .long("in")
                        .value_name("image source file")
                        .required(true)
                        .help("Source image that contains the hidden message"),
                ),
        )
        .subcommand(
            Command::new("capacity")
                .about("Shows how many bits an image can hold, optionally sized against a message")
                .arg(
                    Arg::new("input_image")
                        .short('i')
                        .long("in")
                        .value_name("image source file")
                        .required(true)
                        .help("Carrier image to inspect"),
                )
                .arg(
                    Arg::new("message")
                        .short('m')
                        .long("message")
                        .value_name("text message")
                        .required(false)
                        .help("Estimate the bits this message would actually occupy"),
                )
                .arg(
                    Arg::new("compress")
                        .short('c')
                        .long("compress")
                        .action(ArgAction::SetTrue)
                        .help("Estimate with compression enabled"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("hide", m)) => {
            let password = password_from(m, "Password to encrypt with");
            let options = HideOptions {
                compress: m.get_flag("compress"),
                obfuscate: !m.get_flag("no_obfuscate"),
            };

            log::info!("hiding message, options: {options:?}");
            let report = hide_file(
                Path::new(m.get_one::<String>("media").unwrap()),
                Path::new(m.get_one::<String>("write_to_file").unwrap()),
                m.get_one::<String>("message").unwrap(),
                &password,
                options,
            )?;

            println!("Message hidden: {report}");
        }
        Some(("reveal", m)) => {
            let password = password_from(m, "Password to decrypt with");
            let message = reveal_file(
                Path::new(m.get_one::<String>("input_image").unwrap()),
                &password,
            )?;

            println!("{message}");
        }
        Some(("capacity", m)) => {
            let image = Path::new(m.get_one::<String>("input_image").unwrap());
            let total = capacity_of(image)?;
            println!("Total capacity: {total} bits");

            if let Some(message) = m.get_one::<String>("message") {
                let used = Pipeline::new().estimate_used_bits(message, m.get_flag("compress"))?;
                let utilization = used as f64 / total as f64 * 100.0;
                println!("Message needs:  {used} bits ({utilization:.2}%)");
                if used > total {
                    println!("The message does NOT fit this image.");
                }
            }
        }
        _ => {}
    }

    Ok(())
}

fn password_from(matches: &ArgMatches, prompt: &str) -> String {
    match matches.get_one::<String>("password") {
        Some(password) => password.to_string(),
        None => dialoguer::Password::new()
            .with_prompt(prompt)
            .interact()
            .expect("Failed to read the password from the terminal"),
    }
}
