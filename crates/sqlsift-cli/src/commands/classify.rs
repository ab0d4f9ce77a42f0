use std::process::exit;

use sqlsift_lib::{Classifier, MatchedRule, Verdict};

pub struct ClassifyArgs {
    pub text: String,
    pub json: bool,
}

pub fn run(args: ClassifyArgs) {
    let verdict = Classifier::new().classify(&args.text);

    if !args.json {
        println!("{}", format_verdict(&verdict));
        return;
    }

    match serde_json::to_string_pretty(&verdict) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: cannot serialize verdict: {e}");
            exit(1);
        }
    }
}

pub fn format_verdict(verdict: &Verdict) -> String {
    let label = if verdict.is_query_like {
        "query-like"
    } else {
        "not query-like"
    };
    match verdict.rule {
        MatchedRule::NoMatch => format!("{label}: {}", verdict.tier()),
        ref rule => format!("{label}: {} ({rule})", verdict.tier()),
    }
}
