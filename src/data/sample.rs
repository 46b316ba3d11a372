//! Built-in sample records shown when no data file is configured.

use super::entity::Entity;
use super::model::{Record, Value};

pub fn records(entity: Entity) -> Vec<Record> {
    match entity {
        Entity::Bookings => bookings(),
        Entity::Payments => payments(),
        Entity::Carts => carts(),
        Entity::Promotions => promotions(),
    }
}

struct Booking<'a> {
    id: i64,
    customer: &'a str,
    email: &'a str,
    phone: &'a str,
    service: &'a str,
    date: &'a str,
    time: &'a str,
    amount: i64,
    status: &'a str,
}

impl Booking<'_> {
    fn into_record(self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("customer", self.customer)
            .with("email", self.email)
            .with("phone", self.phone)
            .with("service", self.service)
            .with("date", Value::date(self.date))
            .with("time", self.time)
            .with("amount", self.amount)
            .with("status", self.status)
    }
}

fn bookings() -> Vec<Record> {
    let rows = [
        Booking {
            id: 1,
            customer: "Aarav Sharma",
            email: "aarav.sharma@example.com",
            phone: "+91 98200 11223",
            service: "Deep Home Cleaning",
            date: "2024-03-05",
            time: "10:00",
            amount: 4500,
            status: "confirmed",
        },
        Booking {
            id: 2,
            customer: "Priya Nair",
            email: "priya.nair@example.com",
            phone: "+91 98450 33445",
            service: "AC Servicing",
            date: "2024-03-05",
            time: "14:30",
            amount: 1800,
            status: "pending",
        },
        Booking {
            id: 3,
            customer: "Rohan Mehta",
            email: "rohan.m@example.com",
            phone: "+91 99300 55667",
            service: "Kitchen Deep Clean",
            date: "2024-03-06",
            time: "09:00",
            amount: 3200,
            status: "completed",
        },
        Booking {
            id: 4,
            customer: "Sneha Iyer",
            email: "sneha.iyer@example.com",
            phone: "+91 97410 77889",
            service: "Sofa Shampooing",
            date: "2024-03-07",
            time: "11:15",
            amount: 2400,
            status: "cancelled",
        },
        Booking {
            id: 5,
            customer: "Vikram Rao",
            email: "vikram.rao@example.com",
            phone: "+91 90080 99001",
            service: "Pest Control",
            date: "2024-03-08",
            time: "16:00",
            amount: 75000,
            status: "confirmed",
        },
        Booking {
            id: 6,
            customer: "Ananya Gupta",
            email: "ananya.g@example.com",
            phone: "+91 98860 12121",
            service: "Bathroom Cleaning, Premium",
            date: "2024-03-08",
            time: "12:45",
            amount: 1500,
            status: "pending",
        },
    ];
    rows.into_iter().map(Booking::into_record).collect()
}

struct Payment<'a> {
    id: i64,
    transaction_id: &'a str,
    booking_id: i64,
    customer: &'a str,
    method: &'a str,
    date: &'a str,
    amount: i64,
    status: &'a str,
}

impl Payment<'_> {
    fn into_record(self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("transaction_id", self.transaction_id)
            .with("booking_id", self.booking_id)
            .with("customer", self.customer)
            .with("method", self.method)
            .with("date", Value::date(self.date))
            .with("amount", self.amount)
            .with("status", self.status)
    }
}

fn payments() -> Vec<Record> {
    let rows = [
        Payment {
            id: 101,
            transaction_id: "TXN-8F2A19",
            booking_id: 1,
            customer: "Aarav Sharma",
            method: "UPI",
            date: "2024-03-05",
            amount: 4500,
            status: "paid",
        },
        Payment {
            id: 102,
            transaction_id: "TXN-8F2A20",
            booking_id: 2,
            customer: "Priya Nair",
            method: "Card",
            date: "2024-03-05",
            amount: 1800,
            status: "pending",
        },
        Payment {
            id: 103,
            transaction_id: "TXN-8F2A21",
            booking_id: 3,
            customer: "Rohan Mehta",
            method: "Cash",
            date: "2024-03-06",
            amount: 3200,
            status: "paid",
        },
        Payment {
            id: 104,
            transaction_id: "TXN-8F2A22",
            booking_id: 4,
            customer: "Sneha Iyer",
            method: "UPI",
            date: "2024-03-07",
            amount: 2400,
            status: "refunded",
        },
        Payment {
            id: 105,
            transaction_id: "TXN-8F2A23",
            booking_id: 5,
            customer: "Vikram Rao",
            method: "Net Banking",
            date: "2024-03-08",
            amount: 75000,
            status: "failed",
        },
    ];
    rows.into_iter().map(Payment::into_record).collect()
}

struct Cart<'a> {
    id: i64,
    customer: &'a str,
    email: &'a str,
    items: &'a [&'a str],
    total: i64,
    updated: &'a str,
    status: &'a str,
}

impl Cart<'_> {
    fn into_record(self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("customer", self.customer)
            .with("email", self.email)
            .with("items", self.items.join("; "))
            .with("item_count", self.items.len() as i64)
            .with("total", self.total)
            .with("updated", Value::date(self.updated))
            .with("status", self.status)
    }
}

fn carts() -> Vec<Record> {
    let rows = [
        Cart {
            id: 201,
            customer: "Kabir Singh",
            email: "kabir.singh@example.com",
            items: &["Deep Home Cleaning", "Sofa Shampooing"],
            total: 6900,
            updated: "2024-03-04",
            status: "active",
        },
        Cart {
            id: 202,
            customer: "Meera Pillai",
            email: "meera.p@example.com",
            items: &["AC Servicing"],
            total: 1800,
            updated: "2024-03-02",
            status: "abandoned",
        },
        Cart {
            id: 203,
            customer: "Aarav Sharma",
            email: "aarav.sharma@example.com",
            items: &["Deep Home Cleaning"],
            total: 4500,
            updated: "2024-03-05",
            status: "converted",
        },
        Cart {
            id: 204,
            customer: "Ishaan Das",
            email: "ishaan.das@example.com",
            items: &["Pest Control", "Kitchen Deep Clean", "Bathroom Cleaning"],
            total: 8200,
            updated: "2024-03-06",
            status: "active",
        },
    ];
    rows.into_iter().map(Cart::into_record).collect()
}

struct Promotion<'a> {
    id: i64,
    code: &'a str,
    title: &'a str,
    discount: &'a str,
    valid_from: &'a str,
    valid_until: &'a str,
    usage_count: i64,
    status: &'a str,
}

impl Promotion<'_> {
    fn into_record(self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("code", self.code)
            .with("title", self.title)
            .with("discount", self.discount)
            .with("valid_from", Value::date(self.valid_from))
            .with("valid_until", Value::date(self.valid_until))
            .with("usage_count", self.usage_count)
            .with("status", self.status)
    }
}

fn promotions() -> Vec<Record> {
    let rows = [
        Promotion {
            id: 301,
            code: "SPRING20",
            title: "Spring cleaning, 20% off",
            discount: "20%",
            valid_from: "2024-03-01",
            valid_until: "2024-03-31",
            usage_count: 42,
            status: "active",
        },
        Promotion {
            id: 302,
            code: "FIRSTAC",
            title: "First AC service",
            discount: "₹300",
            valid_from: "2024-02-01",
            valid_until: "2024-02-29",
            usage_count: 118,
            status: "expired",
        },
        Promotion {
            id: 303,
            code: "MONSOON15",
            title: "Monsoon pest control",
            discount: "15%",
            valid_from: "2024-06-01",
            valid_until: "2024-07-31",
            usage_count: 0,
            status: "scheduled",
        },
    ];
    rows.into_iter().map(Promotion::into_record).collect()
}
