//! Fixed sample feed served whenever the upstream page cannot be used.

use crate::data::types::Market;

struct Sample {
    id: &'static str,
    question: &'static str,
    prices: [&'static str; 2],
    volume: &'static str,
    liquidity: &'static str,
    end_date: &'static str,
    category: &'static str,
}

const SAMPLES: [Sample; 5] = [
    Sample {
        id: "1",
        question: "Will Bitcoin reach $150,000 by end of 2026?",
        prices: ["0.42", "0.58"],
        volume: "12500000",
        liquidity: "850000",
        end_date: "2026-12-31T23:59:59Z",
        category: "Crypto",
    },
    Sample {
        id: "2",
        question: "Will Ethereum flip Bitcoin market cap in 2026?",
        prices: ["0.08", "0.92"],
        volume: "3200000",
        liquidity: "420000",
        end_date: "2026-12-31T23:59:59Z",
        category: "Crypto",
    },
    Sample {
        id: "3",
        question: "Will the Fed cut rates in March 2026?",
        prices: ["0.65", "0.35"],
        volume: "8900000",
        liquidity: "1200000",
        end_date: "2026-03-20T18:00:00Z",
        category: "Economics",
    },
    Sample {
        id: "4",
        question: "Will OpenAI release GPT-5 before July 2026?",
        prices: ["0.73", "0.27"],
        volume: "5600000",
        liquidity: "780000",
        end_date: "2026-07-01T00:00:00Z",
        category: "Tech",
    },
    Sample {
        id: "5",
        question: "Will Taylor Swift announce new album in 2026?",
        prices: ["0.88", "0.12"],
        volume: "2100000",
        liquidity: "340000",
        end_date: "2026-12-31T23:59:59Z",
        category: "Entertainment",
    },
];

pub fn sample_markets() -> Vec<Market> {
    SAMPLES
        .iter()
        .map(|s| Market {
            id: s.id.to_string(),
            question: s.question.to_string(),
            description: None,
            outcomes: vec!["Yes".to_string(), "No".to_string()],
            outcome_prices: s.prices.iter().map(|p| p.to_string()).collect(),
            volume: s.volume.to_string(),
            liquidity: s.liquidity.to_string(),
            end_date: Some(s.end_date.to_string()),
            category: Some(s.category.to_string()),
            image: None,
            slug: None,
        })
        .collect()
}
