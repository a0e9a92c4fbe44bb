use std::io::{self, BufRead, Write};

use crate::notifications::{InvalidTime, NotificationTime};

/// Prompts on stdout and reads one line from stdin. `None` once stdin is closed.
pub fn input(prompt: &str) -> io::Result<Option<String>> {
    read_answer(&mut io::stdin().lock(), &mut io::stdout(), prompt)
}

fn read_answer(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<String>> {
    let mut line = String::new();
    write!(writer, "{prompt}")?;
    writer.flush()?;
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

pub fn str_to_bool(mut str: String) -> Option<bool> {
    str.make_ascii_lowercase();
    match str.trim() {
        "y" | "yes" | "yeah" | "yea" | "true" | "on" => Some(true),
        "n" | "no" | "nope" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Reads a reminder time typed either as `HH:MM` or as separate hour and minute.
pub fn parse_time(text: &str) -> Result<NotificationTime, InvalidTime> {
    let mut parts = text.split_ascii_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(time), None, None) => time.parse(),
        (Some(hour), Some(minute), None) => {
            let number = |part: &str| {
                part.parse::<u32>()
                    .map_err(|_| InvalidTime::Format(text.to_owned()))
            };
            NotificationTime::new(number(hour)?, number(minute)?)
        }
        _ => Err(InvalidTime::Format(text.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_answer_returns_the_line() {
        let mut output = Vec::new();
        let answer = read_answer(&mut "yes\nno\n".as_bytes(), &mut output, ">> ").unwrap();
        assert_eq!(answer.as_deref(), Some("yes\n"));
        assert_eq!(output, b">> ");
    }

    #[test]
    fn read_answer_reports_end_of_input() {
        let mut output = Vec::new();
        assert_eq!(read_answer(&mut "".as_bytes(), &mut output, ">> ").unwrap(), None);
        // a blank line is still an answer
        assert_eq!(
            read_answer(&mut "\n".as_bytes(), &mut output, ">> ").unwrap().as_deref(),
            Some("\n")
        );
    }

    #[test]
    fn str_to_bool_understands_common_answers() {
        assert_eq!(str_to_bool("Yes\n".to_owned()), Some(true));
        assert_eq!(str_to_bool(" off ".to_owned()), Some(false));
        assert_eq!(str_to_bool("maybe".to_owned()), None);
    }

    #[test]
    fn parse_time_accepts_both_forms() {
        assert_eq!(parse_time("07:05").unwrap().to_string(), "07:05");
        assert_eq!(parse_time("7 5").unwrap().to_string(), "07:05");
        assert_eq!(parse_time("25 00"), Err(InvalidTime::Hour(25)));
        assert!(parse_time("").is_err());
        assert!(parse_time("7 5 3").is_err());
    }
}
