//! Independent value synthesis: placeholder templates, regex patterns, and
//! whole-value templates.

use rand::Rng;

use tablesmith_config::GenParams;
use tablesmith_core::format_cell;

use crate::errors::GenerationError;
use crate::strategies::faker;
use crate::strategies::{ColumnStrategy, StrategyContext};

enum Mode<'a> {
    Value {
        value: &'a str,
        tokens: Vec<String>,
    },
    Pattern(rand_regex::Regex),
    Template(&'a str),
}

impl ColumnStrategy for GenParams {
    /// Per row: roll for null injection, then either substitute placeholder
    /// tokens into the value string, sample the regex pattern, or render the
    /// whole-value template. Exactly one mode must be configured.
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        let mode = mode(self)?;
        let count = ctx.working_count();
        let template_env = match mode {
            Mode::Template(_) => Some(faker::template_environment()),
            _ => None,
        };

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            if self.null_percentage > 0
                && ctx.rng.random_range(0..100) < self.null_percentage as u32
            {
                values.push(String::new());
                continue;
            }

            let value = match &mode {
                Mode::Value { value, tokens } => substitute(self, value, tokens, ctx)?,
                Mode::Pattern(regex) => ctx.rng.sample(regex),
                Mode::Template(template) => template_env
                    .as_ref()
                    .map(|env| env.render_str(template, minijinja::context! {}))
                    .transpose()
                    .map_err(|err| {
                        GenerationError::InvalidColumn(format!("rendering template: {err}"))
                    })?
                    .unwrap_or_default(),
            };
            values.push(value);
        }

        ctx.write_column(values);
        Ok(())
    }
}

fn mode(params: &GenParams) -> Result<Mode<'_>, GenerationError> {
        match (&params.value, &params.pattern, &params.template) {
            (Some(value), None, None) => {
                let tokens = faker::placeholder_tokens(value);
                for token in &tokens {
                    if !faker::TOKENS.contains(&token.as_str()) {
                        return Err(GenerationError::InvalidColumn(format!(
                            "unknown placeholder ${{{token}}}"
                        )));
                    }
                }
                Ok(Mode::Value { value, tokens })
            }
            (None, Some(pattern), None) => {
                let regex = rand_regex::Regex::compile(pattern, 256).map_err(|err| {
                    GenerationError::InvalidColumn(format!("invalid pattern {pattern:?}: {err}"))
                })?;
                Ok(Mode::Pattern(regex))
            }
            (None, None, Some(template)) => Ok(Mode::Template(template)),
            _ => Err(GenerationError::InvalidColumn(
                "gen column needs exactly one of value, pattern or template".to_string(),
            )),
        }
    }

    /// Generate each occurring token once and splice it into the string; a
    /// string that is exactly one token becomes that token's formatted value.
fn substitute(
    params: &GenParams,
    value: &str,
    tokens: &[String],
    ctx: &mut StrategyContext<'_>,
) -> Result<String, GenerationError> {
    if let Some(token) = faker::single_token(value) {
        let cell = faker::produce(token, ctx.rng).ok_or_else(|| unknown_token(token))?;
        return Ok(format_cell(params.format.as_deref(), &cell));
    }

    let mut out = value.to_string();
    for token in tokens {
        let cell = faker::produce(token, ctx.rng).ok_or_else(|| unknown_token(token))?;
        let rendered = format_cell(params.format.as_deref(), &cell);
        out = out.replace(&format!("${{{token}}}"), &rendered);
    }
    Ok(out)
}

fn unknown_token(token: &str) -> GenerationError {
    GenerationError::InvalidColumn(format!("unknown placeholder ${{{token}}}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesmith_core::TableStore;

    use crate::strategies::testing::{populate, table_spec};

    fn value_params(value: &str) -> GenParams {
        GenParams {
            value: Some(value.to_string()),
            pattern: None,
            template: None,
            null_percentage: 0,
            format: None,
        }
    }

    #[test]
    fn splices_tokens_into_the_surrounding_text() {
        let mut store = TableStore::new();
        let spec = table_spec("person", 10);

        populate(
            &value_params("${first_name} ${last_name}"),
            &spec,
            "full_name",
            &mut store,
            17,
        )
        .unwrap();

        for value in store.expect("person").unwrap().column("full_name").unwrap() {
            assert_eq!(value.split(' ').count(), 2, "unexpected shape: {value:?}");
            assert!(!value.contains("${"));
        }
    }

    #[test]
    fn a_single_token_value_is_replaced_wholesale() {
        let mut store = TableStore::new();
        let spec = table_spec("person", 10);

        populate(&value_params("${email}"), &spec, "email", &mut store, 17).unwrap();

        for value in store.expect("person").unwrap().column("email").unwrap() {
            assert!(value.contains('@'), "not an email: {value:?}");
        }
    }

    #[test]
    fn null_percentage_of_one_hundred_blanks_every_row() {
        let mut store = TableStore::new();
        let spec = table_spec("person", 20);
        let mut params = value_params("${email}");
        params.null_percentage = 100;

        populate(&params, &spec, "email", &mut store, 17).unwrap();

        for value in store.expect("person").unwrap().column("email").unwrap() {
            assert!(value.is_empty());
        }
    }

    #[test]
    fn patterns_delegate_to_the_regex_sampler() {
        let mut store = TableStore::new();
        let spec = table_spec("person", 15);
        let params = GenParams {
            value: None,
            pattern: Some(r"[a-z]{3}-[A-Z]{3}-\d{3}".to_string()),
            template: None,
            null_percentage: 0,
            format: None,
        };

        populate(&params, &spec, "code", &mut store, 17).unwrap();

        let shape = regex::Regex::new(r"^[a-z]{3}-[A-Z]{3}-\d{3}$").unwrap();
        for value in store.expect("person").unwrap().column("code").unwrap() {
            assert!(shape.is_match(value), "pattern mismatch: {value:?}");
        }
    }

    #[test]
    fn templates_render_through_the_template_engine() {
        let mut store = TableStore::new();
        let spec = table_spec("person", 5);
        let params = GenParams {
            value: None,
            pattern: None,
            template: Some("Dear {{ last_name() }},".to_string()),
            null_percentage: 0,
            format: None,
        };

        populate(&params, &spec, "greeting", &mut store, 17).unwrap();

        for value in store.expect("person").unwrap().column("greeting").unwrap() {
            assert!(value.starts_with("Dear "));
            assert!(value.ends_with(','));
            assert!(value.len() > "Dear ,".len());
        }
    }

    #[test]
    fn rejects_ambiguous_modes() {
        let mut store = TableStore::new();
        let spec = table_spec("person", 5);
        let params = GenParams {
            value: Some("${email}".to_string()),
            pattern: Some("[a-z]+".to_string()),
            template: None,
            null_percentage: 0,
            format: None,
        };

        let err = populate(&params, &spec, "email", &mut store, 17).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidColumn(_)));
    }

    #[test]
    fn rejects_unknown_placeholders() {
        let mut store = TableStore::new();
        let spec = table_spec("person", 5);

        let err = populate(&value_params("${bogus}"), &spec, "x", &mut store, 17).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidColumn(_)));
    }
}
