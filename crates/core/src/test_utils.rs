//! Shared fixtures for unit tests.

use crate::document::{Checkin, Document, Photo, Place};
use chrono::FixedOffset;

pub(crate) fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("+09:00 is a valid offset")
}

pub(crate) const HEADER_TEXT: &str = "# 名古屋旅行

- date: 2024-01-27–30
";

pub(crate) const RICH_TEXT: &str = "# 鶴見散歩

- date: 2024-01-01

## 鶴見

- id: 0b6f8a52-4d1e-4c3a-9f7b-2e5d8c1a6b90
- date: 2024-01-01T06:22:00+09:00

## 鶴見小野

- id: 5c2e9d71-8a3b-4f60-b1d4-7e9a0c3f2d18
- date: 2024-01-01T08:03:00+09:00

鶴見線はいいですね〜〜
ローカル路線

## ふれ〜ゆ

- id: 9a4d3b2c-1e5f-4a68-8c7d-3b2a1f0e9d57
- date: 2024-01-01T09:16:00+09:00

- fsq_id: 4caeeb861463a143f92490a9
- fsq_name: 横浜市高齢者保養研修施設 ふれーゆ
- fsq_latitude: 35.479997
- fsq_longitude: 139.688232
- fsq_address: 鶴見区末広町1-15-2, 横浜市, 神奈川県, 230-0045

プール

## 海芝浦

- id: e1f2a3b4-c5d6-4e7f-8a9b-0c1d2e3f4a5b
- date: 2024-01-01T10:33:00+09:00

![海芝浦駅](https://example.com/image0.webp)

![京浜工業地帯](https://example.com/image1.webp)
*ホームからは京浜工業地帯が一望できる*
";

pub(crate) fn header_document() -> Document {
    Document {
        title: "名古屋旅行".into(),
        date: "2024-01-27–30".into(),
        checkins: vec![],
    }
}

pub(crate) fn rich_document() -> Document {
    Document {
        title: "鶴見散歩".into(),
        date: "2024-01-01".into(),
        checkins: vec![
            Checkin {
                id: "0b6f8a52-4d1e-4c3a-9f7b-2e5d8c1a6b90".into(),
                datetime: "2024-01-01T06:22:00+09:00".into(),
                ..Checkin::new("鶴見")
            },
            Checkin {
                id: "5c2e9d71-8a3b-4f60-b1d4-7e9a0c3f2d18".into(),
                datetime: "2024-01-01T08:03:00+09:00".into(),
                description: "鶴見線はいいですね〜〜\nローカル路線".into(),
                ..Checkin::new("鶴見小野")
            },
            Checkin {
                id: "9a4d3b2c-1e5f-4a68-8c7d-3b2a1f0e9d57".into(),
                datetime: "2024-01-01T09:16:00+09:00".into(),
                place: Some(Place {
                    fsq_id: "4caeeb861463a143f92490a9".into(),
                    name: "横浜市高齢者保養研修施設 ふれーゆ".into(),
                    formatted_address: "鶴見区末広町1-15-2, 横浜市, 神奈川県, 230-0045".into(),
                    latitude: Some(35.479997),
                    longitude: Some(139.688232),
                }),
                description: "プール".into(),
                ..Checkin::new("ふれ〜ゆ")
            },
            Checkin {
                id: "e1f2a3b4-c5d6-4e7f-8a9b-0c1d2e3f4a5b".into(),
                datetime: "2024-01-01T10:33:00+09:00".into(),
                photos: vec![
                    Photo {
                        src: "https://example.com/image0.webp".into(),
                        alt: "海芝浦駅".into(),
                        caption: None,
                    },
                    Photo {
                        src: "https://example.com/image1.webp".into(),
                        alt: "京浜工業地帯".into(),
                        caption: Some("ホームからは京浜工業地帯が一望できる".into()),
                    },
                ],
                ..Checkin::new("海芝浦")
            },
        ],
    }
}
