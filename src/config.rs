use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub crossword: CrosswordConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrosswordConfig {
    pub word_delimiter: char,
    pub min_words: usize,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub svg_cell_size: u32,
}

impl Default for CrosswordConfig {
    fn default() -> Self {
        Self {
            word_delimiter: ',',
            min_words: 2,
            min_word_length: 2,
            max_word_length: 20,
            svg_cell_size: 40,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            frontend_dir: env::var("FRONTEND_DIR")
                .unwrap_or_else(|_| "./public".to_string()),
        };

        let defaults = CrosswordConfig::default();
        let crossword = CrosswordConfig {
            word_delimiter: match env::var("WORD_DELIMITER") {
                Ok(value) => single_char(&value).context("WORD_DELIMITER must be a single character")?,
                Err(_) => defaults.word_delimiter,
            },
            min_words: env::var("MIN_WORDS")
                .unwrap_or_else(|_| defaults.min_words.to_string())
                .parse()
                .context("MIN_WORDS must be a number")?,
            min_word_length: env::var("MIN_WORD_LENGTH")
                .unwrap_or_else(|_| defaults.min_word_length.to_string())
                .parse()
                .context("MIN_WORD_LENGTH must be a number")?,
            max_word_length: env::var("MAX_WORD_LENGTH")
                .unwrap_or_else(|_| defaults.max_word_length.to_string())
                .parse()
                .context("MAX_WORD_LENGTH must be a number")?,
            svg_cell_size: env::var("SVG_CELL_SIZE")
                .unwrap_or_else(|_| defaults.svg_cell_size.to_string())
                .parse()
                .context("SVG_CELL_SIZE must be a number")?,
        };

        if crossword.min_words == 0 {
            bail!("MIN_WORDS must be at least 1");
        }
        if crossword.min_word_length > crossword.max_word_length {
            bail!("MIN_WORD_LENGTH must not exceed MAX_WORD_LENGTH");
        }

        Ok(Config { server, crossword })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn single_char(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => bail!("expected exactly one character, got {:?}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_char() {
        assert_eq!(single_char(";").unwrap(), ';');
        assert!(single_char("").is_err());
        assert!(single_char(", ").is_err());
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                frontend_dir: "./public".to_string(),
            },
            crossword: CrosswordConfig::default(),
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
