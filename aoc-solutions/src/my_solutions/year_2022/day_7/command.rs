//! Terminal transcript parsing

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ChangeDirectory(CdTarget),
    List(Vec<ListEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdTarget {
    Root,
    Parent,
    Child(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Directory { name: String },
    File { name: String, size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct MalformedCommand {
    /// 1-based line number in the transcript
    pub line: usize,
    pub reason: MalformedReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("`cd` takes exactly one path")]
    CdArity,
    #[error("`ls` takes no arguments")]
    LsArguments,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("output {0:?} does not follow an `ls`")]
    UnexpectedOutput(String),
    #[error("invalid file size {0:?}")]
    InvalidSize(String),
    #[error("entry {0:?} has no name")]
    MissingName(String),
}

fn parse_command(args: &str) -> Result<Command, MalformedReason> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    match tokens.as_slice() {
        ["cd", "/"] => Ok(Command::ChangeDirectory(CdTarget::Root)),
        ["cd", ".."] => Ok(Command::ChangeDirectory(CdTarget::Parent)),
        ["cd", name] => Ok(Command::ChangeDirectory(CdTarget::Child(name.to_string()))),
        ["cd", ..] => Err(MalformedReason::CdArity),
        ["ls"] => Ok(Command::List(Vec::new())),
        ["ls", ..] => Err(MalformedReason::LsArguments),
        _ => Err(MalformedReason::UnknownCommand(args.trim().to_string())),
    }
}

fn parse_entry(line: &str) -> Result<ListEntry, MalformedReason> {
    let (head, name) = line.split_once(' ').unwrap_or((line, ""));
    let name = name.trim();
    if name.is_empty() {
        return Err(MalformedReason::MissingName(line.to_string()));
    }
    if head == "dir" {
        return Ok(ListEntry::Directory {
            name: name.to_string(),
        });
    }
    let size = head
        .parse()
        .map_err(|_| MalformedReason::InvalidSize(head.to_string()))?;
    Ok(ListEntry::File {
        name: name.to_string(),
        size,
    })
}

/// Split a transcript into commands, attaching `ls` output to its command
pub fn parse_transcript(transcript: &str) -> Result<Vec<Command>, MalformedCommand> {
    let mut commands = Vec::new();

    for (idx, line) in transcript.lines().enumerate() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        let malformed = |reason| MalformedCommand {
            line: idx + 1,
            reason,
        };

        // a `$` line is always a command, but only `$ ` introduces a valid one
        if line.starts_with('$') {
            let command = match line.strip_prefix("$ ") {
                Some(args) => parse_command(args),
                None => Err(MalformedReason::UnknownCommand(line.to_string())),
            };
            commands.push(command.map_err(malformed)?);
            continue;
        }

        match commands.last_mut() {
            Some(Command::List(entries)) => entries.push(parse_entry(line).map_err(malformed)?),
            _ => {
                return Err(malformed(MalformedReason::UnexpectedOutput(
                    line.to_string(),
                )));
            }
        }
    }

    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(name: &str) -> ListEntry {
        ListEntry::Directory { name: name.into() }
    }

    fn file(name: &str, size: u64) -> ListEntry {
        ListEntry::File {
            name: name.into(),
            size,
        }
    }

    #[test]
    fn test_commands_in_order() {
        let commands =
            parse_transcript("$ cd /\n$ ls\ndir a\n14848514 b.txt\n\n$ cd a\n$ cd ..\n").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::ChangeDirectory(CdTarget::Root),
                Command::List(vec![dir("a"), file("b.txt", 14848514)]),
                Command::ChangeDirectory(CdTarget::Child("a".into())),
                Command::ChangeDirectory(CdTarget::Parent),
            ]
        );
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(
            parse_transcript("$ ls\n$ cd /").unwrap(),
            vec![
                Command::List(Vec::new()),
                Command::ChangeDirectory(CdTarget::Root)
            ]
        );
    }

    #[test]
    fn test_malformed_lines() {
        let cases = [
            ("$ cd", 1, MalformedReason::CdArity),
            ("$ cd /\n$ cd a b", 2, MalformedReason::CdArity),
            ("$ ls -l", 1, MalformedReason::LsArguments),
            ("$ rm -rf /", 1, MalformedReason::UnknownCommand("rm -rf /".into())),
            ("$cd /", 1, MalformedReason::UnknownCommand("$cd /".into())),
            ("$ ls\n$", 2, MalformedReason::UnknownCommand("$".into())),
            ("$ cd /\n$ ", 2, MalformedReason::UnknownCommand("$".into())),
            ("dir a", 1, MalformedReason::UnexpectedOutput("dir a".into())),
            ("$ cd /\n1 a", 2, MalformedReason::UnexpectedOutput("1 a".into())),
            ("$ ls\n-5 a", 2, MalformedReason::InvalidSize("-5".into())),
            ("$ ls\n\n12ab c", 3, MalformedReason::InvalidSize("12ab".into())),
            ("$ ls\n100", 2, MalformedReason::MissingName("100".into())),
            ("$ ls\ndir ", 2, MalformedReason::MissingName("dir".into())),
        ];
        for (transcript, line, reason) in cases {
            assert_eq!(
                parse_transcript(transcript),
                Err(MalformedCommand { line, reason }),
                "{:?}",
                transcript
            );
        }
    }
}
