// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    baggage (code) {
        code -> Text,
        status -> Text,
        booking_id -> Nullable<BigInt>,
    }
}

diesel::table! {
    bookings (booking_id) {
        booking_id -> BigInt,
        flight_code -> Text,
        passenger_id -> BigInt,
        ticket_number -> Text,
        seat_label -> Text,
        status -> Text,
        owner_login -> Text,
    }
}

diesel::table! {
    flights (code) {
        code -> Text,
        carrier -> Text,
        origin -> Text,
        destination -> Text,
        departure_time -> Text,
        status -> Text,
        flight_date -> Text,
        delay_minutes -> Integer,
        total_seats -> Integer,
        available_seats -> Integer,
        gate_number -> Nullable<Integer>,
    }
}

diesel::table! {
    gates (gate_number) {
        gate_number -> Integer,
    }
}

diesel::table! {
    passengers (passenger_id) {
        passenger_id -> BigInt,
        name -> Text,
        surname -> Text,
        document_number -> Text,
    }
}

diesel::table! {
    seats (flight_code, seat_label) {
        flight_code -> Text,
        seat_label -> Text,
        occupied -> Integer,
    }
}

diesel::table! {
    users (login) {
        login -> Text,
        password_hash -> Text,
        name -> Text,
        surname -> Text,
        role -> Text,
    }
}

diesel::joinable!(baggage -> bookings (booking_id));
diesel::joinable!(bookings -> flights (flight_code));
diesel::joinable!(bookings -> passengers (passenger_id));
diesel::joinable!(bookings -> users (owner_login));
diesel::joinable!(flights -> gates (gate_number));
diesel::joinable!(seats -> flights (flight_code));

diesel::allow_tables_to_appear_in_same_query!(
    baggage, bookings, flights, gates, passengers, seats, users,
);
