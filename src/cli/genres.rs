use tabled::Table;

use crate::{error, types::GenreTableRow};

use super::{client, spinner};

pub async fn genres() {
    let client = client();

    let pb = spinner("Fetching genres...");
    let result = client.get_genres().await;
    pb.finish_and_clear();

    match result {
        Ok(mut genres) => {
            genres.sort_by_key(|g| g.to_lowercase());
            let rows: Vec<GenreTableRow> = genres
                .into_iter()
                .map(|genre| GenreTableRow { genre })
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => error!("Failed to fetch genres. Err: {}", e),
    }
}
