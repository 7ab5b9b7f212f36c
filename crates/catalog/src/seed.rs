//! The storefront's built-in collection.

use briolka_core::{DomainResult, ProductId, ReviewId};

use crate::product::NewProduct;
use crate::rating::Rating;
use crate::repository::InMemoryCatalog;
use crate::review::Review;

const IMAGE_BASE: &str =
    "https://cdn.poehali.dev/projects/8e42c228-18df-4ab7-9132-64c9173c6ce3/files";

fn review(id: u32, author: &str, stars: u8, text: &str, date: &str) -> DomainResult<Review> {
    Review::new(ReviewId::new(id), author, Rating::new(stars)?, text, date)
}

/// Products of the built-in collection, in display order.
pub fn products() -> DomainResult<Vec<NewProduct>> {
    Ok(vec![
        NewProduct {
            id: ProductId::new(1),
            name: "Midnight Elegance".to_string(),
            stone_type: "Чёрный Оникс".to_string(),
            price: 12500,
            image_ref: format!("{IMAGE_BASE}/2f39ce26-e453-4978-8292-e8c38d893079.jpg"),
            description: "Роскошный браслет из натурального чёрного оникса с золотыми вставками. \
                          Символ силы и элегантности."
                .to_string(),
            reviews: vec![
                review(1, "Анна М.", 5, "Невероятно красивый браслет! Качество на высшем уровне.", "15.11.2024")?,
                review(2, "Екатерина В.", 5, "Ношу каждый день, получаю комплименты. Спасибо мастеру!", "10.11.2024")?,
            ],
        },
        NewProduct {
            id: ProductId::new(2),
            name: "Rose Dream".to_string(),
            stone_type: "Розовый Кварц".to_string(),
            price: 9800,
            image_ref: format!("{IMAGE_BASE}/9c44beb1-8e88-468b-b43f-069f6aa5297e.jpg"),
            description: "Нежный браслет из розового кварца, камня любви и гармонии. \
                          Идеально подходит для особых случаев."
                .to_string(),
            reviews: vec![review(
                3,
                "Мария С.",
                5,
                "Очень нежный и красивый. Камни качественные, работа аккуратная.",
                "20.11.2024",
            )?],
        },
        NewProduct {
            id: ProductId::new(3),
            name: "Golden Tiger".to_string(),
            stone_type: "Тигровый Глаз".to_string(),
            price: 11200,
            image_ref: format!("{IMAGE_BASE}/94640224-a328-45f6-bb1e-3df566a4aed2.jpg"),
            description: "Эксклюзивный браслет из тигрового глаза с золотым покрытием. \
                          Камень удачи и процветания."
                .to_string(),
            reviews: vec![
                review(4, "Дмитрий К.", 5, "Купил в подарок жене, она в восторге! Упаковка премиальная.", "18.11.2024")?,
                review(5, "Ольга Р.", 4, "Красивый браслет, немного тяжеловат, но качество отличное.", "12.11.2024")?,
            ],
        },
    ])
}

impl InMemoryCatalog {
    /// Catalog preloaded with the built-in collection.
    pub fn seed() -> DomainResult<Self> {
        Self::new(products()?)
    }
}
