use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  status            refresh the knowledge base status
  tab <id>          switch tab (add-text, upload-file, query)
  source <name>     set the source of the next text
  text <content>    add text to the knowledge base
  file <path>       pick a file to upload
  upload            upload the picked file
  topk <n>          set how many context items a query returns
  ask <question>    ask a question
  clear             clear the knowledge base
  model             check the language model connection
  save <dir>        save the knowledge base on the server
  load <dir>        load a knowledge base on the server
  show              print the page
  help              print this help
  quit              leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Status,
    Tab(String),
    Source(String),
    Text(String),
    File(PathBuf),
    Upload,
    TopK(String),
    Ask(String),
    Clear,
    Model,
    Save(String),
    Load(String),
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "" => Command::Empty,
            "status" => Command::Status,
            "tab" => Command::Tab(rest.to_string()),
            "source" => Command::Source(rest.to_string()),
            "text" => Command::Text(rest.to_string()),
            "file" if !rest.is_empty() => Command::File(PathBuf::from(rest)),
            "upload" => Command::Upload,
            "topk" | "top-k" => Command::TopK(rest.to_string()),
            "ask" | "query" => Command::Ask(rest.to_string()),
            "clear" => Command::Clear,
            "model" => Command::Model,
            "save" => Command::Save(rest.to_string()),
            "load" => Command::Load(rest.to_string()),
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_keep_inner_spacing() {
        assert_eq!(
            Command::parse("  ask   what do  pandas eat? "),
            Command::Ask("what do  pandas eat?".to_string())
        );
    }

    #[test]
    fn file_needs_a_path() {
        assert_eq!(
            Command::parse("file ./notes.txt"),
            Command::File(PathBuf::from("./notes.txt"))
        );
        assert_eq!(Command::parse("file"), Command::Unknown("file".to_string()));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("dance"), Command::Unknown("dance".to_string()));
        assert_eq!(Command::parse("QUIT"), Command::Quit);
    }

    #[test]
    fn text_without_content_is_still_a_submission() {
        assert_eq!(Command::parse("text"), Command::Text(String::new()));
    }
}
