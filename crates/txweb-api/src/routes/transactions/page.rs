//! Home page rendering
//!
//! A single page listing every transaction with a small form to add one.
//! The list is rendered on the server; the Add button posts to the JSON API
//! and redraws the list from the returned collection.

use crate::{base_html, AppState};
use axum::extract::State;
use axum::response::Html;
use txweb_core::Transaction;
use txweb_utils::escape_html;

pub const HOME_TITLE: &str = "Transactions App";

const HOME_SCRIPT: &str = r#"
    function renderTransactions(transactions) {
        const list = document.getElementById('transactions');
        list.innerHTML = '';
        transactions.forEach(t => {
            const item = document.createElement('li');
            item.className = 'flex justify-between py-2 border-b';
            const description = document.createElement('span');
            description.textContent = t.Description ?? '';
            const amount = document.createElement('span');
            amount.className = 'font-medium';
            amount.textContent = String(t.Amount);
            item.appendChild(description);
            item.appendChild(amount);
            list.appendChild(item);
        });
    }

    async function addTransaction() {
        const status = document.getElementById('status');
        const body = {
            Description: document.getElementById('description').value,
            Amount: parseInt(document.getElementById('amount').value, 10) || 0
        };
        status.textContent = 'Saving...';
        try {
            const response = await fetch('/api/Transactions', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json', 'Accept': 'application/json' },
                body: JSON.stringify(body)
            });
            if (!response.ok) {
                status.textContent = 'Failed to add transaction (' + response.status + ')';
                return;
            }
            renderTransactions(await response.json());
            document.getElementById('description').value = '';
            document.getElementById('amount').value = '';
            status.textContent = '';
        } catch (err) {
            console.error('Failed to add transaction:', err);
            status.textContent = 'Failed to add transaction';
        }
    }
"#;

/// One `<li>` per transaction, matching what the script renders
pub fn render_transaction_items(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|t| {
            format!(
                "<li class='flex justify-between py-2 border-b'><span>{}</span><span class='font-medium'>{}</span></li>",
                escape_html(t.description_or_empty()),
                t.amount
            )
        })
        .collect()
}

/// GET /
pub async fn page_home(State(state): State<AppState>) -> Html<String> {
    let (items, notice) = match state.controller.list().await {
        Ok(transactions) => (render_transaction_items(&transactions), String::new()),
        Err(e) => {
            log::error!("Failed to load transactions for home page: {}", e);
            (String::new(), escape_html(&e.to_string()))
        }
    };

    let inner_content = format!(
        r#"<main class='max-w-xl mx-auto p-6'>
        <h1 class='text-2xl font-bold mb-6'>{}</h1>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <div class='flex gap-2'>
                <input type='text' id='description' placeholder='Description' class='flex-1 px-3 py-2 border rounded-lg'>
                <input type='number' id='amount' placeholder='Amount' class='w-32 px-3 py-2 border rounded-lg'>
                <input type='button' value='Add' onclick='addTransaction()' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>
            </div>
            <p id='status' class='text-sm text-red-600 mt-2'>{}</p>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <ul id='transactions'>{}</ul>
        </div>
    </main>
    <script>{}</script>"#,
        HOME_TITLE, notice, items, HOME_SCRIPT
    );

    Html(base_html(HOME_TITLE, &inner_content))
}
