//! Source fixtures, one realistic program per language

use perturbench_engine::{LanguageId, SourceUnit};

pub const PYTHON_SAMPLE: &str = r#"import math


def mean(values):
    """Arithmetic mean of a non-empty list."""
    total = 0
    for value in values:
        total += value
    return total / len(values)


def describe(values, label="data"):
    if not values:
        return "empty"
    avg = mean(values)
    while avg > 100:
        avg = math.sqrt(avg)
    if avg > 10:
        kind = "large"
    else:
        kind = "small"
    return label + ": " + kind
"#;

pub const JAVA_SAMPLE: &str = r#"import java.util.List;

public class Counter {
    private int total;

    public int count(List<String> items) {
        int seen = 0;
        for (String item : items) {
            if (item.isEmpty()) {
                continue;
            }
            seen++;
        }
        while (seen > 10) {
            seen -= 10;
        }
        total += seen;
        return total;
    }

    public String label() {
        return "count: " + total;
    }
}
"#;

pub const JAVASCRIPT_SAMPLE: &str = r#"const fs = require("fs");

function summarize(values) {
  let total = 0;
  for (const value of values) {
    if (value > 0) {
      total += value;
    }
  }
  while (total > 100) {
    total = total / 2;
  }
  return "total=" + total;
}

class Report {
  render(rows) {
    return rows.map((row) => summarize(row)).join("\n");
  }
}

module.exports = { summarize, Report };
"#;

pub const C_SAMPLE: &str = r#"#include <stdio.h>

static int clamp(int value, int limit) {
    if (value > limit) {
        return limit;
    }
    return value;
}

int main(void) {
    int sum = 0;
    for (int i = 0; i < 10; i++) {
        sum = clamp(sum + i, 20);
    }
    while (sum > 5) {
        sum -= 5;
    }
    printf("sum=%d\n", sum);
    return 0;
}
"#;

/// Every fixture as a source unit
pub fn all_samples() -> Vec<SourceUnit> {
    vec![
        SourceUnit::new(PYTHON_SAMPLE, LanguageId::Python),
        SourceUnit::new(JAVA_SAMPLE, LanguageId::Java),
        SourceUnit::new(JAVASCRIPT_SAMPLE, LanguageId::JavaScript),
        SourceUnit::new(C_SAMPLE, LanguageId::C),
    ]
}

/// Python module with `n` locals in one function
pub fn fixture_n_locals(n: usize) -> String {
    let body: String = (0..n)
        .map(|i| format!("    var_{i} = {i}\n"))
        .collect();
    format!("def compute():\n{body}    return 0\n")
}
