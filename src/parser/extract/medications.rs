use super::Entry;
use crate::parser::format;
use crate::parser::lines::content_lines;
use crate::parser::model::Observation;

/// `date **name** **dose**` from the first line after each marker.
pub fn extract(entries: &[Entry]) -> Vec<Observation> {
    entries
        .iter()
        .map(|e| {
            let (name, dose) = content_lines(&e.body)
                .next()
                .map(split_name_dose)
                .unwrap_or((format::MISSING, String::new()));
            Observation::new(e.date, format::medication(e.date, name, &dose), Some(e.page))
        })
        .collect()
}

fn split_name_dose(line: &str) -> (&str, String) {
    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or(format::MISSING);
    (name, words.collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_dose() {
        let entries = vec![Entry {
            date: "Jan 5, 2024",
            page: 1,
            body: vec!["Aspirin 81mg", "take daily"],
        }];
        let obs = extract(&entries);
        assert_eq!(obs[0].display, "Jan 5, 2024 **Aspirin** **81mg**");
        assert_eq!(obs[0].date, "Jan 5, 2024");
    }

    #[test]
    fn multi_word_dose() {
        let entries = vec![Entry {
            date: "Feb 2, 2024",
            page: 1,
            body: vec!["", "Metformin   500 mg twice daily"],
        }];
        assert_eq!(
            extract(&entries)[0].display,
            "Feb 2, 2024 **Metformin** **500 mg twice daily**"
        );
    }

    #[test]
    fn missing_line() {
        let entries = vec![Entry { date: "Feb 2, 2024", page: 1, body: vec![] }];
        assert_eq!(extract(&entries)[0].display, "Feb 2, 2024 **N/A**");
    }
}
