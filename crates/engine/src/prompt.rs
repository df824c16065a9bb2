//! Prompt synthesizer: turns wallet facts into generation instructions.
//!
//! Selection is rule-based and deterministic:
//! 1. Pick at most one transaction-count angle
//! 2. Pick at most one balance angle
//! 3. Embed both, numbered, in the fixed roast template
//!
//! The template is a contract with the generation service: it fixes the
//! paragraph count, the figures to quote, and the closing `VERDICT:` line.

use roast_common::types::AddressQuery;

/// Network named in the prompt.
pub const NETWORK_NAME: &str = "Arc Testnet";

/// Chain id named in the prompt.
pub const CHAIN_ID: u64 = 5_042_002;

/// Commentary keyed on lifetime transaction count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountAngle {
    Void,
    Snail,
    Tourist,
    Overachieving,
    Grinding,
    Transcended,
}

impl CountAngle {
    /// First matching rule wins; 21..=200 transactions get no angle.
    pub fn select(tx_count: u64) -> Option<Self> {
        match tx_count {
            0 => Some(CountAngle::Void),
            1..=3 => Some(CountAngle::Snail),
            4..=20 => Some(CountAngle::Tourist),
            5001.. => Some(CountAngle::Transcended),
            1001..=5000 => Some(CountAngle::Grinding),
            201..=1000 => Some(CountAngle::Overachieving),
            _ => None,
        }
    }

    pub fn render(self, tx_count: u64) -> String {
        match self {
            CountAngle::Void => "Zero transactions ever. Born, saw the blockchain, immediately gave up. A wallet-shaped void.".to_string(),
            CountAngle::Snail => format!(
                "{} transaction(s) total lifetime. The blockchain equivalent of a snail doing one push-up.",
                tx_count
            ),
            CountAngle::Tourist => format!(
                "{} transactions — tourist behavior. One visit, one selfie, back home to tell nobody.",
                tx_count
            ),
            CountAngle::Transcended => format!(
                "{} transactions. This wallet IS the chain. It has transcended human existence.",
                group_thousands(tx_count)
            ),
            CountAngle::Grinding => format!(
                "{} transactions on FAKE testnet money. Grinding with the intensity of a prop trading desk. For free tokens.",
                group_thousands(tx_count)
            ),
            CountAngle::Overachieving => format!(
                "{} transactions on a network where currency is free. Overachieving in meaninglessness.",
                tx_count
            ),
        }
    }
}

/// Commentary keyed on USDC balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceAngle {
    /// Empty wallet that has transacted
    VoidClaimed,
    /// Empty wallet that never even used the faucet
    NeverCollected,
    QuantumFoam,
    Hoarding,
}

impl BalanceAngle {
    /// First matching rule wins; balances in `1..=500000` get no angle.
    pub fn select(usdc_balance: f64, tx_count: u64) -> Option<Self> {
        if usdc_balance == 0.0 && tx_count > 0 {
            Some(BalanceAngle::VoidClaimed)
        } else if usdc_balance == 0.0 {
            Some(BalanceAngle::NeverCollected)
        } else if usdc_balance < 1.0 {
            Some(BalanceAngle::QuantumFoam)
        } else if usdc_balance > 500_000.0 {
            Some(BalanceAngle::Hoarding)
        } else {
            None
        }
    }

    pub fn render(self, usdc_balance: f64, tx_count: u64) -> String {
        match self {
            BalanceAngle::VoidClaimed => format!(
                "{} txs sent, $0.00 left. Where did it all go? The void has claimed it.",
                tx_count
            ),
            BalanceAngle::NeverCollected => "$0.00 USDC on a testnet where USDC is FREE. Couldn't collect free money. Historic laziness.".to_string(),
            BalanceAngle::QuantumFoam => format!(
                "${:.4} USDC. That's not a balance, that's quantum foam.",
                usdc_balance
            ),
            BalanceAngle::Hoarding => format!(
                "${} in fake USDC. Hoarding monopoly money like it's real.",
                group_decimal(usdc_balance)
            ),
        }
    }
}

/// Rendered angles for a wallet, count angle first.
pub fn select_angles(tx_count: u64, usdc_balance: f64) -> Vec<String> {
    let count = CountAngle::select(tx_count).map(|angle| angle.render(tx_count));
    let balance = BalanceAngle::select(usdc_balance, tx_count)
        .map(|angle| angle.render(usdc_balance, tx_count));
    count.into_iter().chain(balance).collect()
}

/// Build the roast prompt for a wallet. Pure: identical inputs give
/// byte-identical output.
pub fn build_prompt(address: &AddressQuery, tx_count: u64, usdc_balance: f64) -> String {
    let angles = select_angles(tx_count, usdc_balance)
        .iter()
        .enumerate()
        .map(|(i, angle)| format!("{}. {}", i + 1, angle))
        .collect::<Vec<_>>()
        .join("\n");
    let count = group_thousands(tx_count);
    let balance = format!("{:.2}", usdc_balance);

    format!(
        "You are a savage crypto roast comedian. Roast this {network} wallet brutally and hilariously.

LIVE ON-CHAIN DATA:
- Address: {address}
- Transactions sent: {count}
- USDC balance: ${balance}
- Network: {network} (Chain {chain_id}) — ALL TOKENS ARE FAKE AND FREE

ROAST ANGLES:
{angles}

RULES:
- Write exactly 3 paragraphs of savage roast
- Reference exact numbers: {count} txs, ${balance} USDC
- Use web3 slang: ser, fren, ngmi, wagmi, degen, wen moon, probably nothing, have fun staying poor
- Mock the TESTNET angle hard — fake money, zero stakes, still failing somehow
- End with: VERDICT: [one brutal line in ALL CAPS]
- Plain text only, zero asterisks, zero markdown",
        network = NETWORK_NAME,
        chain_id = CHAIN_ID,
    )
}

/// en-US digit grouping: `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// en-US grouping with up to three fraction digits, trailing zeros dropped:
/// `750000.5` → `"750,000.5"`.
pub fn group_decimal(value: f64) -> String {
    let fixed = format!("{:.3}", value);
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    let whole = whole
        .parse::<u64>()
        .map(group_thousands)
        .unwrap_or_else(|_| whole.to_string());

    if fraction.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, fraction)
    }
}
