//! Static HTML pages.

use ballot_core::{Tally, MAX_CANDIDATE_LEN};

/// Voting form served at `/` by the voting service.
pub fn vote_form() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Voting App</title></head>
<body>
<h1>Cast your vote</h1>
<form method="post" action="/vote">
<label for="candidate">Candidate</label>
<input id="candidate" name="candidate" type="text" maxlength="{MAX_CANDIDATE_LEN}" required>
<button type="submit">Vote</button>
</form>
<p>Or POST JSON <code>{{"candidate": "name"}}</code> to <code>/vote</code>.</p>
</body>
</html>
"#
    )
}

/// Results table, highest count first.
pub fn tally_table(tally: &Tally) -> String {
    let mut page = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Results</title></head>\n<body>\n<h1>Results</h1>\n",
    );

    if tally.is_empty() {
        page.push_str("<p>No votes yet</p>\n");
    } else {
        page.push_str("<table>\n<tr><th>Candidate</th><th>Votes</th></tr>\n");
        for (candidate, count) in tally.ranked() {
            page.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape(candidate),
                count
            ));
        }
        page.push_str(&format!(
            "</table>\n<p>Total votes: {}</p>\n",
            tally.total()
        ));
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
